use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RankingError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

pub type RankingResult<T> = Result<T, RankingError>;
