use crate::error::SentimentError;
use crate::sentiment::{SentimentModel, SentimentScore};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, trace};

/// Hosted emotion model the application was built against.
pub const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/j-hartmann/emotion-english-distilroberta-base";

/// Upper bound on a single inference request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Sentiment model served by the Hugging Face inference API.
#[derive(Clone, Debug)]
pub struct HuggingFaceModel {
    client: reqwest::Client,
    /// Full model URL, e.g. [`DEFAULT_ENDPOINT`].
    pub endpoint: String,
    token: Option<String>,
}

/// The API answers `[[{label, score}, ...]]` for a single input; some
/// deployments flatten this to one level.
#[derive(Deserialize)]
#[serde(untagged)]
enum Response {
    Nested(Vec<Vec<SentimentScore>>),
    Flat(Vec<SentimentScore>),
}

impl HuggingFaceModel {
    /// Build a client for `endpoint`, bounding every request by `timeout`.
    pub fn new(
        endpoint: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SentimentError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    fn parse(body: &str) -> Result<Vec<SentimentScore>, SentimentError> {
        let parsed: Response =
            serde_json::from_str(body).map_err(|e| SentimentError::Malformed(e.to_string()))?;
        let scores = match parsed {
            Response::Nested(mut outer) => {
                if outer.is_empty() {
                    return Err(SentimentError::Empty);
                }
                outer.swap_remove(0)
            }
            Response::Flat(scores) => scores,
        };
        if scores.is_empty() {
            return Err(SentimentError::Empty);
        }
        Ok(scores)
    }
}

#[async_trait]
impl SentimentModel for HuggingFaceModel {
    async fn score(&self, text: &str) -> Result<Vec<SentimentScore>, SentimentError> {
        let body = serde_json::json!({ "inputs": text });
        trace!(target: "sentiment", url = %self.endpoint, "inference request");
        let mut req = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            debug!(target: "sentiment", status = status.as_u16(), body = %text, "inference rejected");
            return Err(SentimentError::Status(status.as_u16()));
        }
        let scores = Self::parse(&text)?;
        debug!(target: "sentiment", labels = scores.len(), "inference response");
        Ok(scores)
    }
}
