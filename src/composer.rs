use crate::classifier::EmotionClassifier;
use crate::emotion::Emotion;
use crate::sentiment::SentimentModel;
use rand::Rng;
use rand::seq::SliceRandom;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::trace;

/// Pause in typing before a draft is classified.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(800);

const ALIAS_ADJECTIVES: [&str; 10] = [
    "Silver", "Golden", "Mystic", "Quiet", "Brave", "Soft", "Wild", "Deep", "Calm", "Bright",
];
const ALIAS_NOUNS: [&str; 10] = [
    "Moon", "River", "Star", "Leaf", "Cloud", "Shadow", "Flame", "Ocean", "Wind", "Spirit",
];

/// Emotion saved with a new post.
///
/// A selector left at `Neutral` defers to the detected emotion; any other
/// selection is the author's explicit choice and wins.
///
/// ```
/// use lifetea::{composer::resolve_emotion, Emotion};
///
/// assert_eq!(resolve_emotion(Emotion::Neutral, Some(Emotion::Sad)), Emotion::Sad);
/// assert_eq!(resolve_emotion(Emotion::Calm, Some(Emotion::Sad)), Emotion::Calm);
/// assert_eq!(resolve_emotion(Emotion::Neutral, None), Emotion::Neutral);
/// ```
pub fn resolve_emotion(selected: Emotion, detected: Option<Emotion>) -> Emotion {
    match (selected, detected) {
        (Emotion::Neutral, Some(detected)) => detected,
        (selected, _) => selected,
    }
}

/// Pseudonym such as `QuietRiver42` for anonymous posts.
pub fn generate_alias<R: Rng>(rng: &mut R) -> String {
    let adjective = ALIAS_ADJECTIVES.choose(rng).copied().unwrap_or("Quiet");
    let noun = ALIAS_NOUNS.choose(rng).copied().unwrap_or("Cloud");
    let number: u8 = rng.gen_range(0..100);
    format!("{adjective}{noun}{number}")
}

/// Classifies a draft as it is being written.
///
/// Each [`submit`](DraftClassifier::submit) waits for the debounce delay and
/// classifies only if no newer submission arrived in the meantime. A result
/// that finishes after a newer submission is discarded, so the last draft
/// always wins.
pub struct DraftClassifier<M> {
    classifier: Arc<EmotionClassifier<M>>,
    debounce: Duration,
    generation: AtomicU64,
}

impl<M: SentimentModel> DraftClassifier<M> {
    pub fn new(classifier: Arc<EmotionClassifier<M>>) -> Self {
        Self::with_debounce(classifier, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(classifier: Arc<EmotionClassifier<M>>, debounce: Duration) -> Self {
        Self {
            classifier,
            debounce,
            generation: AtomicU64::new(0),
        }
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Classify `text` unless superseded; `None` means a newer draft took over.
    pub async fn submit(&self, text: &str) -> Option<Emotion> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.debounce).await;
        if !self.is_current(generation) {
            trace!(target: "classifier", generation, "draft superseded before classification");
            return None;
        }
        let emotion = self.classifier.classify(text).await;
        if !self.is_current(generation) {
            trace!(target: "classifier", generation, "draft superseded during classification");
            return None;
        }
        Some(emotion)
    }
}
