//! SemMatch library crate (used by the console binary, the HTTP server and integration tests).
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`VectorEncoder`], [`EncoderConfig`] - Text to fixed-dimension vectors
//! - [`SimilarityRanker`], [`VectorMatrix`] - Exact cosine top-K over stored vectors
//! - [`MatchingEngine`], [`MatchResult`] - Threshold-judged semantic lookup over a corpus
//!
//! ## Collaborators
//! - [`FaqDataset`], [`normalize_text`] - FAQ corpus loading and preprocessing
//! - [`Config`] - `SEMMATCH_*` environment configuration
//!
//! The encoder is shared through `Arc` and never mutated after load, so one instance can
//! back any number of engines across threads.

pub mod config;
pub mod constants;
pub mod corpus;
pub mod embedding;
pub mod matching;
pub mod ranking;

pub use config::{Config, ConfigError};
pub use constants::{
    ALL_DOMAINS, DEFAULT_EMBEDDING_DIM, DEFAULT_MODEL_NAME, DEFAULT_SIMILARITY_THRESHOLD,
    DEFAULT_TOP_K,
};
pub use corpus::{CorpusError, FaqDataset, FaqItem, normalize_text};
pub use embedding::{Embedding, EmbeddingError, EncoderConfig, VectorEncoder};
pub use matching::{
    CorpusEntry, MatchConfig, MatchError, MatchResult, MatchedEntry, MatchingEngine,
};
pub use ranking::{
    RankedIndex, RankingError, SimilarityRanker, VectorMatrix, cosine_similarity,
};
