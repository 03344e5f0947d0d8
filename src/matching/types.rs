use serde::Serialize;

use crate::constants::{DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOP_K, is_valid_threshold};

use super::error::MatchError;

#[derive(Debug, Clone, Copy, PartialEq)]
/// Threshold and top-K defaults for a [`MatchingEngine`](super::MatchingEngine).
pub struct MatchConfig {
    /// Minimum best score for [`MatchResult::meets_threshold`]. Must lie in `[0, 1]`.
    pub threshold: f32,
    /// Matches returned by callers that do not choose a count.
    pub default_top_k: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            default_top_k: DEFAULT_TOP_K,
        }
    }
}

impl MatchConfig {
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_default_top_k(mut self, top_k: usize) -> Self {
        self.default_top_k = top_k;
        self
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if !is_valid_threshold(self.threshold) {
            return Err(MatchError::InvalidConfig {
                reason: format!(
                    "threshold must be between 0.0 and 1.0, got {}",
                    self.threshold
                ),
            });
        }
        if self.default_top_k == 0 {
            return Err(MatchError::InvalidConfig {
                reason: "default_top_k must be >= 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Reference text plus its opaque metadata. The engine never inspects `metadata`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusEntry<M> {
    pub text: String,
    pub metadata: M,
}

impl<M> CorpusEntry<M> {
    pub fn new(text: impl Into<String>, metadata: M) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }
}

/// One ranked corpus entry, borrowed from the engine that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedEntry<'a, M> {
    /// Position of the entry in the engine's corpus.
    pub index: usize,
    pub text: &'a str,
    pub metadata: &'a M,
    pub score: f32,
}

/// Outcome of a single query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult<'a, M> {
    /// Up to `top_k` entries, descending by score.
    pub matches: Vec<MatchedEntry<'a, M>>,
    /// Score of the first match (`0.0` if there are none).
    pub best_score: f32,
    /// Threshold this result was judged against.
    pub threshold: f32,
    /// `best_score >= threshold`.
    pub meets_threshold: bool,
}

impl<'a, M> MatchResult<'a, M> {
    pub(crate) fn new(matches: Vec<MatchedEntry<'a, M>>, threshold: f32) -> Self {
        let best_score = matches.first().map_or(0.0, |m| m.score);
        Self {
            matches,
            best_score,
            threshold,
            meets_threshold: best_score >= threshold,
        }
    }

    /// Returns the highest-scoring match.
    pub fn best(&self) -> Option<&MatchedEntry<'a, M>> {
        self.matches.first()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
