use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Token produced by the tokenizer but missing from the fitted vocabulary.
    #[error("token {0:?} is not in the vocabulary")]
    UnknownToken(String),

    /// Transform requested against a vocabulary fitted on empty text.
    #[error("vocabulary is empty; fit it on a non-empty corpus first")]
    EmptyVocabulary,

    #[error("probability vector has length {got}, vocabulary has {expected} entries")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("temperature must be a non-negative number, got {0}")]
    InvalidTemperature(f64),

    /// Every entry of the rescaled distribution is zero or not finite.
    #[error("probability vector has no positive mass")]
    DegenerateDistribution,

    #[error("corpus has {len} tokens, need at least {window} to seed generation")]
    CorpusTooShort { len: usize, window: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to fetch corpus from {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Candle(#[from] candle_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
