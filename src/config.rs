use crate::classifier::{DEFAULT_MIN_CHARS, EmotionClassifier, LabelMap};
use crate::composer::{DEFAULT_DEBOUNCE, DraftClassifier};
use crate::emotion::Emotion;
use crate::error::ConfigError;
use crate::hugging_face::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, HuggingFaceModel};
use crate::mood::{DEFAULT_DATE_FORMAT, DEFAULT_WINDOW, MoodAggregator};
use crate::retry::{RetryModel, RetryPolicy};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Environment variable holding the inference API token.
pub const TOKEN_ENV: &str = "LIFETEA_HF_TOKEN";
/// Environment variable overriding the inference endpoint.
pub const ENDPOINT_ENV: &str = "LIFETEA_ENDPOINT";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClassifierConfig {
    pub endpoint: String,
    pub api_token: Option<String>,
    pub timeout_ms: u64,
    pub min_chars: usize,
    pub max_retries: usize,
    pub retry_delay_ms: u64,
    pub debounce_ms: u64,
    /// Overrides for the sentiment remap, e.g. `sadness = "Melancholy"`.
    pub labels: BTreeMap<String, String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_token: None,
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            min_chars: DEFAULT_MIN_CHARS,
            max_retries: 0,
            retry_delay_ms: 1000,
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            labels: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct MoodConfig {
    pub window: usize,
    pub date_format: String,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// Contents of `lifetea.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct LifeTeaConfig {
    pub classifier: ClassifierConfig,
    pub mood: MoodConfig,
}

impl LifeTeaConfig {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Apply [`TOKEN_ENV`] and [`ENDPOINT_ENV`] on top of file values.
    pub fn with_env(self) -> Self {
        self.with_overrides(
            std::env::var(TOKEN_ENV).ok(),
            std::env::var(ENDPOINT_ENV).ok(),
        )
    }

    pub fn with_overrides(mut self, token: Option<String>, endpoint: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.classifier.api_token = Some(token);
        }
        if let Some(endpoint) = endpoint.filter(|e| !e.is_empty()) {
            self.classifier.endpoint = endpoint;
        }
        self
    }

    pub fn label_map(&self) -> Result<LabelMap, ConfigError> {
        self.classifier
            .labels
            .iter()
            .try_fold(LabelMap::default(), |map, (label, target)| {
                let emotion: Emotion = target
                    .parse()
                    .map_err(|_| ConfigError::InvalidTarget(target.clone()))?;
                map.with(label, emotion)
            })
    }

    pub fn aggregator(&self) -> Result<MoodAggregator, ConfigError> {
        MoodAggregator::new(self.mood.window, self.mood.date_format.clone())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.classifier.max_retries,
            Duration::from_millis(self.classifier.retry_delay_ms),
        )
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.classifier.debounce_ms)
    }

    /// Classifier backed by the configured inference endpoint.
    ///
    /// `min_chars` may raise or lower the length gate but never disable it.
    pub fn classifier(&self) -> anyhow::Result<EmotionClassifier<RetryModel<HuggingFaceModel>>> {
        if self.classifier.min_chars == 0 {
            return Err(ConfigError::ZeroMinChars.into());
        }
        let model = HuggingFaceModel::new(
            self.classifier.endpoint.clone(),
            self.classifier.api_token.clone(),
            Duration::from_millis(self.classifier.timeout_ms),
        )?;
        let model = RetryModel::new(model, self.retry_policy());
        Ok(EmotionClassifier::with_labels(model, self.label_map()?)
            .min_chars(self.classifier.min_chars))
    }

    /// Composer-side classifier that waits `debounce_ms` for typing to pause.
    pub fn draft_classifier(
        &self,
    ) -> anyhow::Result<DraftClassifier<RetryModel<HuggingFaceModel>>> {
        Ok(DraftClassifier::with_debounce(
            Arc::new(self.classifier()?),
            self.debounce(),
        ))
    }
}

/// Load a [`LifeTeaConfig`] from a TOML file.
///
/// # Examples
///
/// ```no_run
/// use lifetea::config::load;
/// # tokio_test::block_on(async {
/// let cfg = load("lifetea.toml").await.unwrap();
/// assert!(cfg.mood.window > 0);
/// # });
/// ```
pub async fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<LifeTeaConfig> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading config");
    let text = tokio::fs::read_to_string(path).await?;
    LifeTeaConfig::from_toml(&text)
}
