use crate::error::SentimentError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::trace;

/// Confidence assigned by a sentiment model to one label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub label: String,
    pub score: f64,
}

impl SentimentScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// External model that scores a text against a fixed sentiment vocabulary.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use lifetea::{SentimentError, SentimentModel, SentimentScore};
///
/// struct AlwaysJoy;
///
/// #[async_trait]
/// impl SentimentModel for AlwaysJoy {
///     async fn score(&self, _text: &str) -> Result<Vec<SentimentScore>, SentimentError> {
///         Ok(vec![SentimentScore::new("joy", 1.0)])
///     }
/// }
/// ```
#[async_trait]
pub trait SentimentModel: Send + Sync {
    /// Score `text`, returning one entry per label in the model's vocabulary.
    async fn score(&self, text: &str) -> Result<Vec<SentimentScore>, SentimentError>;
}

#[async_trait]
impl<M: SentimentModel + ?Sized> SentimentModel for std::sync::Arc<M> {
    async fn score(&self, text: &str) -> Result<Vec<SentimentScore>, SentimentError> {
        (**self).score(text).await
    }
}

/// Model returning canned scores, or failing when built with
/// [`StaticModel::failing`]. Counts how often it was asked.
#[derive(Debug, Default)]
pub struct StaticModel {
    scores: Option<Vec<SentimentScore>>,
    calls: AtomicUsize,
}

impl StaticModel {
    pub fn new(scores: Vec<SentimentScore>) -> Self {
        Self {
            scores: Some(scores),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    /// Number of times [`SentimentModel::score`] was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SentimentModel for StaticModel {
    async fn score(&self, text: &str) -> Result<Vec<SentimentScore>, SentimentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        trace!(target: "sentiment", chars = text.chars().count(), "StaticModel scoring");
        self.scores
            .clone()
            .ok_or_else(|| SentimentError::Unavailable("static model has no scores".into()))
    }
}
