use thiserror::Error;

/// Reasons a sentiment model could not produce scores.
///
/// The classifier folds every variant into a `Neutral` result; the variants
/// exist so the logs say what went wrong.
#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("endpoint returned status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("model returned no scores")]
    Empty,

    #[error("model unavailable: {0}")]
    Unavailable(String),
}

/// Invalid configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown sentiment label `{0}`")]
    UnknownSentiment(String),

    #[error("`{0}` cannot be a classifier output")]
    InvalidTarget(String),

    #[error("mood window must be at least 1")]
    EmptyWindow,

    #[error("`{0}` is not a calendar date format")]
    InvalidDateFormat(String),

    #[error("min_chars must be at least 1")]
    ZeroMinChars,
}
