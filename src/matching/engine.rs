use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::constants::is_valid_threshold;
use crate::embedding::{EmbeddingError, EncoderConfig, VectorEncoder};
use crate::ranking::{SimilarityRanker, VectorMatrix};

use super::error::MatchError;
use super::types::{CorpusEntry, MatchConfig, MatchResult, MatchedEntry};

/// Immutable semantic index over a corpus of texts with opaque metadata.
///
/// The whole corpus is encoded once, in [`MatchingEngine::new`]. After that the engine
/// is read-only: [`match_query`](Self::match_query) takes `&self`, so a single instance
/// can be shared across threads (e.g. behind an `Arc`) without external locking.
///
/// The encoder is owned by the engine, so queries are always embedded by the same
/// encoder that produced the corpus vectors.
pub struct MatchingEngine<M = String> {
    entries: Vec<CorpusEntry<M>>,
    vectors: VectorMatrix,
    encoder: Arc<VectorEncoder>,
    ranker: SimilarityRanker,
    config: MatchConfig,
}

impl<M> std::fmt::Debug for MatchingEngine<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchingEngine")
            .field("entries", &self.entries.len())
            .field("embedding_dim", &self.vectors.dim())
            .field("encoder", &self.encoder)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<M> MatchingEngine<M> {
    /// Builds an engine, encoding every entry text in one batched call.
    ///
    /// Fails with [`MatchError::EmptyCorpus`] if `entries` is empty.
    pub fn new<I, T>(
        encoder: Arc<VectorEncoder>,
        entries: I,
        config: MatchConfig,
    ) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = (T, M)>,
        T: Into<String>,
    {
        config.validate()?;

        let entries: Vec<CorpusEntry<M>> = entries
            .into_iter()
            .map(|(text, metadata)| CorpusEntry::new(text, metadata))
            .collect();

        if entries.is_empty() {
            return Err(MatchError::EmptyCorpus);
        }

        let texts: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
        let embeddings = encoder.encode_batch(&texts)?;

        if embeddings.len() != entries.len() {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!(
                    "encoder returned {} vectors for {} texts",
                    embeddings.len(),
                    entries.len()
                ),
            }
            .into());
        }

        let vectors = VectorMatrix::from_rows(encoder.embedding_dim(), embeddings)?;

        info!(
            entries = entries.len(),
            embedding_dim = vectors.dim(),
            threshold = config.threshold,
            stub = encoder.is_stub(),
            "Matching engine built"
        );

        Ok(Self {
            entries,
            vectors,
            encoder,
            ranker: SimilarityRanker::new(),
            config,
        })
    }

    /// Loads a dedicated encoder from `encoder_config`, then builds the engine.
    pub fn from_config<I, T>(
        encoder_config: EncoderConfig,
        entries: I,
        config: MatchConfig,
    ) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = (T, M)>,
        T: Into<String>,
    {
        let encoder = Arc::new(VectorEncoder::load(encoder_config)?);
        Self::new(encoder, entries, config)
    }

    /// Returns up to `top_k` entries most similar to `query`, judged against the
    /// configured threshold.
    pub fn match_query(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<MatchResult<'_, M>, MatchError> {
        self.match_query_with_threshold(query, top_k, None)
    }

    /// Like [`match_query`](Self::match_query) with a per-call threshold.
    ///
    /// `None` uses the configured threshold. The engine itself is never modified.
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub fn match_query_with_threshold(
        &self,
        query: &str,
        top_k: usize,
        threshold: Option<f32>,
    ) -> Result<MatchResult<'_, M>, MatchError> {
        if top_k == 0 {
            return Err(MatchError::InvalidArgument {
                reason: "top_k must be >= 1".to_string(),
            });
        }

        let threshold = threshold.unwrap_or(self.config.threshold);
        if !is_valid_threshold(threshold) {
            return Err(MatchError::InvalidArgument {
                reason: format!("threshold must be between 0.0 and 1.0, got {}", threshold),
            });
        }

        let query_vector = self.encoder.encode(query)?;
        let ranked = self.ranker.rank(&query_vector, &self.vectors, top_k)?;

        let matches: Vec<MatchedEntry<'_, M>> = ranked
            .into_iter()
            .map(|r| {
                let entry = &self.entries[r.index];
                MatchedEntry {
                    index: r.index,
                    text: &entry.text,
                    metadata: &entry.metadata,
                    score: r.score,
                }
            })
            .collect();

        let result = MatchResult::new(matches, threshold);

        debug!(
            returned = result.len(),
            best_score = result.best_score,
            threshold,
            meets_threshold = result.meets_threshold,
            "Query matched"
        );

        Ok(result)
    }

    /// Number of corpus entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: construction rejects empty corpora.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CorpusEntry<M>] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&CorpusEntry<M>> {
        self.entries.get(index)
    }

    /// Stored vector for the entry at `index`.
    pub fn entry_vector(&self, index: usize) -> Option<&[f32]> {
        self.vectors.row(index)
    }

    pub fn embedding_dim(&self) -> usize {
        self.vectors.dim()
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn encoder(&self) -> &Arc<VectorEncoder> {
        &self.encoder
    }
}
