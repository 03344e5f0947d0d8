use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::ranking::RankingError;

/// Errors raised by [`MatchingEngine`](super::MatchingEngine).
#[derive(Debug, Error)]
pub enum MatchError {
    /// Engine construction was given zero entries.
    #[error("corpus is empty: at least one entry is required")]
    EmptyCorpus,

    /// A per-call argument was out of range; engine state is unaffected.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("invalid match configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Encoder failure (model unavailable, degenerate vector, inference).
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl MatchError {
    /// Returns `true` if the caller can fix the request and retry.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, MatchError::InvalidArgument { .. })
    }
}

impl From<RankingError> for MatchError {
    fn from(err: RankingError) -> Self {
        match err {
            RankingError::InvalidArgument { reason } => MatchError::InvalidArgument { reason },
            RankingError::DimensionMismatch { expected, actual } => {
                MatchError::DimensionMismatch { expected, actual }
            }
        }
    }
}
