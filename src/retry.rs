use crate::error::SentimentError;
use crate::sentiment::{SentimentModel, SentimentScore};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Policy controlling how many times an operation is retried and the delay
/// between attempts.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of additional attempts to make after the first failure.
    pub max_retries: usize,
    /// Delay between retry attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

impl RetryPolicy {
    pub fn new(max_retries: usize, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// A policy that makes exactly one attempt.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Execute `op` retrying on error according to the policy.
    pub async fn retry<F, Fut, T, E>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut attempts = 0usize;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) if attempts < self.max_retries => {
                    attempts += 1;
                    debug!(target: "sentiment", attempt = attempts, error = %e, "retrying");
                    tokio::time::sleep(self.delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Wrapper around a [`SentimentModel`] that applies a [`RetryPolicy`].
#[derive(Clone)]
pub struct RetryModel<M> {
    inner: M,
    policy: RetryPolicy,
}

impl<M> RetryModel<M> {
    pub fn new(inner: M, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl<M> SentimentModel for RetryModel<M>
where
    M: SentimentModel,
{
    async fn score(&self, text: &str) -> Result<Vec<SentimentScore>, SentimentError> {
        self.policy.retry(|| self.inner.score(text)).await
    }
}
