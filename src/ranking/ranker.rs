use std::cmp::Ordering;
use tracing::debug;

use super::error::{RankingError, RankingResult};
use super::matrix::VectorMatrix;

/// A corpus row index paired with its similarity to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedIndex {
    pub index: usize,
    pub score: f32,
}

/// Brute-force cosine ranker.
///
/// Each call is `O(rows × dim)`; nothing is cached beyond the matrix the caller owns.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityRanker;

impl SimilarityRanker {
    pub fn new() -> Self {
        Self
    }

    /// Scores every row of `corpus` against `query` and returns the best `top_k`.
    ///
    /// Scores are full cosine similarities, so inputs need not be normalized. Results are
    /// sorted by descending score; equal scores keep ascending row order. `top_k` is
    /// clamped to the row count and must be at least 1.
    pub fn rank(
        &self,
        query: &[f32],
        corpus: &VectorMatrix,
        top_k: usize,
    ) -> RankingResult<Vec<RankedIndex>> {
        if top_k == 0 {
            return Err(RankingError::InvalidArgument {
                reason: "top_k must be >= 1".to_string(),
            });
        }

        if corpus.is_empty() {
            return Ok(vec![]);
        }

        if query.len() != corpus.dim() {
            return Err(RankingError::DimensionMismatch {
                expected: corpus.dim(),
                actual: query.len(),
            });
        }

        let query_norm = l2_norm(query);
        let mut scored: Vec<RankedIndex> = corpus
            .iter()
            .enumerate()
            .map(|(index, row)| RankedIndex {
                index,
                score: cosine_with_norm(query, query_norm, row),
            })
            .collect();

        // Stable sort: ties stay in corpus order.
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(top_k.min(corpus.rows()));

        debug!(
            rows = corpus.rows(),
            returned = scored.len(),
            top_score = scored.first().map(|r| r.score),
            "Ranked corpus"
        );

        Ok(scored)
    }
}

#[inline]
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[inline]
pub fn l2_norm(v: &[f32]) -> f32 {
    dot(v, v).sqrt()
}

/// Cosine similarity; `0.0` when either side is empty, zero-norm or lengths differ.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    cosine_with_norm(a, l2_norm(a), b)
}

#[inline]
fn cosine_with_norm(a: &[f32], norm_a: f32, b: &[f32]) -> f32 {
    let (dot, norm_b_sq) = a
        .iter()
        .zip(b)
        .fold((0.0f32, 0.0f32), |(dot, nb), (av, bv)| {
            (dot + av * bv, nb + bv * bv)
        });
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
