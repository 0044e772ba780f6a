use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Emotion attached to a story.
///
/// Variants are declared in mood-scale order, which is also the order used to
/// break ties when ranking emotions. `Default` stands in for any label read
/// back from storage that is not one of the known names; the classifier never
/// produces it.
///
/// ```
/// use lifetea::Emotion;
///
/// assert_eq!("Happy".parse::<Emotion>().unwrap(), Emotion::Happy);
/// assert_eq!(Emotion::parse_lossy("ecstatic"), Emotion::Default);
/// assert!(Emotion::Happy < Emotion::Sad);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Emotion {
    Happy,
    Hopeful,
    Calm,
    Melancholy,
    Sad,
    Anxious,
    Frustrated,
    Overwhelmed,
    Neutral,
    Default,
}

impl Emotion {
    /// Every emotion a user can pick or the classifier can emit.
    pub const SELECTABLE: [Emotion; 9] = [
        Emotion::Happy,
        Emotion::Hopeful,
        Emotion::Calm,
        Emotion::Melancholy,
        Emotion::Sad,
        Emotion::Anxious,
        Emotion::Frustrated,
        Emotion::Overwhelmed,
        Emotion::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "Happy",
            Emotion::Hopeful => "Hopeful",
            Emotion::Calm => "Calm",
            Emotion::Melancholy => "Melancholy",
            Emotion::Sad => "Sad",
            Emotion::Anxious => "Anxious",
            Emotion::Frustrated => "Frustrated",
            Emotion::Overwhelmed => "Overwhelmed",
            Emotion::Neutral => "Neutral",
            Emotion::Default => "Default",
        }
    }

    /// Parse a stored label, mapping anything unknown to [`Emotion::Default`].
    pub fn parse_lossy(label: &str) -> Self {
        label.parse().unwrap_or(Emotion::Default)
    }

    /// Emoji shown next to the emotion on the dashboard.
    pub fn emoji(&self) -> &'static str {
        match self {
            Emotion::Happy => "😊",
            Emotion::Hopeful => "✨",
            Emotion::Calm => "😌",
            Emotion::Melancholy => "🌧️",
            Emotion::Sad => "😢",
            Emotion::Anxious => "😰",
            Emotion::Frustrated => "😤",
            Emotion::Overwhelmed => "😵",
            Emotion::Neutral | Emotion::Default => "😐",
        }
    }

    /// Hex colour used for the emotion's slice of the mood ring.
    pub fn color(&self) -> &'static str {
        match self {
            Emotion::Happy => "#F59E0B",
            Emotion::Sad => "#6366F1",
            Emotion::Frustrated => "#EF4444",
            Emotion::Calm => "#8B5CF6",
            Emotion::Anxious => "#F97316",
            Emotion::Melancholy => "#3B82F6",
            Emotion::Hopeful => "#10B981",
            Emotion::Overwhelmed => "#EC4899",
            Emotion::Neutral | Emotion::Default => "#CBD5E1",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known emotion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown emotion `{0}`")]
pub struct UnknownEmotion(pub String);

impl FromStr for Emotion {
    type Err = UnknownEmotion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "Happy" => Emotion::Happy,
            "Hopeful" => Emotion::Hopeful,
            "Calm" => Emotion::Calm,
            "Melancholy" => Emotion::Melancholy,
            "Sad" => Emotion::Sad,
            "Anxious" => Emotion::Anxious,
            "Frustrated" => Emotion::Frustrated,
            "Overwhelmed" => Emotion::Overwhelmed,
            "Neutral" => Emotion::Neutral,
            "Default" => Emotion::Default,
            other => return Err(UnknownEmotion(other.to_string())),
        })
    }
}

impl From<String> for Emotion {
    fn from(label: String) -> Self {
        Emotion::parse_lossy(&label)
    }
}

impl From<Emotion> for String {
    fn from(emotion: Emotion) -> Self {
        emotion.as_str().to_string()
    }
}

/// Label vocabulary of the external sentiment model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BaseSentiment {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Disgust,
    Neutral,
    Other(String),
}

impl BaseSentiment {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "joy" => BaseSentiment::Joy,
            "sadness" => BaseSentiment::Sadness,
            "anger" => BaseSentiment::Anger,
            "fear" => BaseSentiment::Fear,
            "surprise" => BaseSentiment::Surprise,
            "disgust" => BaseSentiment::Disgust,
            "neutral" => BaseSentiment::Neutral,
            _ => BaseSentiment::Other(label.to_string()),
        }
    }
}
