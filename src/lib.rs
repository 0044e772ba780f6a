//! Emotion classification and mood aggregation for LifeTea stories.
//!
//! An [`EmotionClassifier`] turns story text into an [`Emotion`] with the help
//! of an external [`SentimentModel`]. The [`mood`] views turn stored
//! [`ClassifiedPost`]s into the community mood ring, an author's sentiment
//! journey and their current vibe.

pub mod classifier;
pub mod composer;
pub mod config;
pub mod emotion;
pub mod error;
pub mod hugging_face;
pub mod mood;
pub mod post;
pub mod retry;
pub mod sentiment;

pub use classifier::{EmotionClassifier, LabelMap};
pub use composer::DraftClassifier;
pub use config::LifeTeaConfig;
pub use emotion::{BaseSentiment, Emotion};
pub use error::{ConfigError, SentimentError};
pub use hugging_face::HuggingFaceModel;
pub use mood::{AuthorStats, MoodAggregator, MoodDistributionEntry, MoodReport, MoodTrendPoint};
pub use post::ClassifiedPost;
pub use retry::{RetryModel, RetryPolicy};
pub use sentiment::{SentimentModel, SentimentScore, StaticModel};
