use crate::emotion::Emotion;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A stored post as seen by the mood views.
///
/// Rows exported from the posts table deserialize directly; columns the views
/// do not use are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedPost {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default = "missing_emotion", deserialize_with = "lossy_emotion")]
    pub emotion: Emotion,
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hug_count: u64,
}

fn missing_emotion() -> Emotion {
    Emotion::Default
}

/// Null or unknown emotion columns read back as [`Emotion::Default`].
fn lossy_emotion<'de, D: Deserializer<'de>>(de: D) -> Result<Emotion, D::Error> {
    let label: Option<String> = Option::deserialize(de)?;
    Ok(label.map_or(Emotion::Default, Emotion::from))
}

fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::deserialize(de)?.unwrap_or_default())
}

impl ClassifiedPost {
    pub fn new(id: impl Into<String>, emotion: Emotion, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            user_id: None,
            emotion,
            created_at,
            title: String::new(),
            hug_count: 0,
        }
    }

    pub fn by(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_hugs(mut self, hug_count: u64) -> Self {
        self.hug_count = hug_count;
        self
    }
}
