//! Turns story text into an [`Emotion`].

use crate::emotion::{BaseSentiment, Emotion};
use crate::error::ConfigError;
use crate::sentiment::{SentimentModel, SentimentScore};
use futures_util::future::join_all;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Stories shorter than this many characters are never sent to the model.
pub const DEFAULT_MIN_CHARS: usize = 20;

/// Fixed remap from model sentiments to [`Emotion`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMap {
    entries: HashMap<BaseSentiment, Emotion>,
}

impl Default for LabelMap {
    fn default() -> Self {
        let entries = [
            (BaseSentiment::Joy, Emotion::Happy),
            (BaseSentiment::Sadness, Emotion::Sad),
            (BaseSentiment::Anger, Emotion::Frustrated),
            (BaseSentiment::Fear, Emotion::Anxious),
            (BaseSentiment::Surprise, Emotion::Hopeful),
            (BaseSentiment::Disgust, Emotion::Overwhelmed),
            (BaseSentiment::Neutral, Emotion::Calm),
        ]
        .into_iter()
        .collect();
        Self { entries }
    }
}

impl LabelMap {
    /// Return a copy with `label` remapped to `target`.
    ///
    /// Only the model's own vocabulary can be remapped, and `Default` is never
    /// a valid target.
    ///
    /// ```
    /// use lifetea::{Emotion, LabelMap};
    ///
    /// let map = LabelMap::default().with("sadness", Emotion::Melancholy).unwrap();
    /// assert_eq!(map.get("sadness"), Some(Emotion::Melancholy));
    /// assert!(LabelMap::default().with("sadness", Emotion::Default).is_err());
    /// ```
    pub fn with(mut self, label: &str, target: Emotion) -> Result<Self, ConfigError> {
        let base = BaseSentiment::from_label(label);
        if let BaseSentiment::Other(other) = base {
            return Err(ConfigError::UnknownSentiment(other));
        }
        if target == Emotion::Default {
            return Err(ConfigError::InvalidTarget(target.to_string()));
        }
        self.entries.insert(base, target);
        Ok(self)
    }

    pub fn get(&self, label: &str) -> Option<Emotion> {
        self.entries.get(&BaseSentiment::from_label(label)).copied()
    }
}

/// Pick the highest score; the first of equal scores wins and NaN never does.
fn top_score(scores: &[SentimentScore]) -> Option<&SentimentScore> {
    scores.iter().fold(None, |best, s| match best {
        Some(b) if s.score > b.score => Some(s),
        Some(b) => Some(b),
        None if !s.score.is_nan() => Some(s),
        None => None,
    })
}

/// Classifies story text using an injected [`SentimentModel`].
///
/// Classification never fails: short text, model errors and unmapped labels
/// all come back as [`Emotion::Neutral`].
///
/// ```
/// use lifetea::{EmotionClassifier, Emotion, SentimentScore, StaticModel};
///
/// # tokio_test::block_on(async {
/// let model = StaticModel::new(vec![
///     SentimentScore::new("joy", 0.8),
///     SentimentScore::new("sadness", 0.2),
/// ]);
/// let classifier = EmotionClassifier::new(model);
/// assert_eq!(classifier.classify("too short").await, Emotion::Neutral);
/// assert_eq!(
///     classifier.classify("Today I finally finished my first marathon!").await,
///     Emotion::Happy
/// );
/// # });
/// ```
pub struct EmotionClassifier<M> {
    model: M,
    labels: LabelMap,
    min_chars: usize,
}

impl<M: SentimentModel> EmotionClassifier<M> {
    pub fn new(model: M) -> Self {
        Self::with_labels(model, LabelMap::default())
    }

    pub fn with_labels(model: M, labels: LabelMap) -> Self {
        Self {
            model,
            labels,
            min_chars: DEFAULT_MIN_CHARS,
        }
    }

    /// Override the length gate.
    pub fn min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Whether `text` is long enough to be sent to the model.
    pub fn is_classifiable(&self, text: &str) -> bool {
        text.chars().count() >= self.min_chars
    }

    /// Classify a single story.
    pub async fn classify(&self, text: &str) -> Emotion {
        if !self.is_classifiable(text) {
            return Emotion::Neutral;
        }
        let scores = match self.model.score(text).await {
            Ok(scores) => scores,
            Err(e) => {
                warn!(target: "classifier", error = %e, "sentiment model unavailable");
                return Emotion::Neutral;
            }
        };
        let Some(top) = top_score(&scores) else {
            debug!(target: "classifier", "no usable scores");
            return Emotion::Neutral;
        };
        match self.labels.get(&top.label) {
            Some(emotion) => {
                debug!(target: "classifier", label = %top.label, score = top.score, %emotion, "classified");
                emotion
            }
            None => {
                debug!(target: "classifier", label = %top.label, "unmapped sentiment label");
                Emotion::Neutral
            }
        }
    }

    /// Classify several stories concurrently, keeping input order.
    pub async fn classify_all<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Emotion> {
        join_all(texts.iter().map(|t| self.classify(t.as_ref()))).await
    }
}
