//! Matching engine: an immutable corpus, its vectors, and threshold-judged top-K queries.

pub mod engine;
pub mod error;
pub mod types;


pub use engine::MatchingEngine;
pub use error::MatchError;
pub use types::{CorpusEntry, MatchConfig, MatchResult, MatchedEntry};
