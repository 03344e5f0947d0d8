//! Exact (brute-force) cosine ranking over an in-memory vector matrix.

pub mod error;
pub mod matrix;
pub mod ranker;

#[cfg(test)]
mod tests;

pub use error::{RankingError, RankingResult};
pub use matrix::VectorMatrix;
pub use ranker::{RankedIndex, SimilarityRanker, cosine_similarity, dot, l2_norm};
