use thiserror::Error;

/// Errors raised by [`VectorEncoder`](super::VectorEncoder).
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// The embedding backend could not be initialized. Not retryable without fixing the
    /// model files or configuration.
    #[error("embedding model '{model}' unavailable: {reason}")]
    ModelUnavailable { model: String, reason: String },

    /// A raw vector had zero (or non-finite) norm and could not be normalized.
    #[error("degenerate vector at batch position {index}: norm is {norm}")]
    DegenerateVector { index: usize, norm: f32 },

    #[error("embedding inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("invalid encoder configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl EmbeddingError {
    pub(crate) fn unavailable(model: &str, reason: impl Into<String>) -> Self {
        EmbeddingError::ModelUnavailable {
            model: model.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<candle_core::Error> for EmbeddingError {
    fn from(err: candle_core::Error) -> Self {
        EmbeddingError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}
