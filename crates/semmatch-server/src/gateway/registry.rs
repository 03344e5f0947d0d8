//! Per-domain engine registry.
//!
//! One [`MatchingEngine`] per domain key, built lazily on first use and shared through
//! `Arc`. Every engine is built with the same [`VectorEncoder`].

use moka::sync::Cache;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;
use tracing::{debug, info};

use semmatch::constants::ALL_DOMAINS;
use semmatch::{CorpusError, FaqDataset, MatchConfig, MatchError, MatchingEngine, VectorEncoder};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("corpus error: {0}")]
    Corpus(#[from] CorpusError),

    #[error("engine error: {0}")]
    Match(#[from] MatchError),
}

pub struct EngineRegistry {
    dataset: FaqDataset,
    encoder: Arc<VectorEncoder>,
    config: MatchConfig,
    engines: Cache<String, Arc<MatchingEngine>>,
    builds: AtomicUsize,
}

impl std::fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineRegistry")
            .field("domains", &self.dataset.domains().collect::<Vec<_>>())
            .field("cached_engines", &self.engines.entry_count())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl EngineRegistry {
    pub fn new(dataset: FaqDataset, encoder: Arc<VectorEncoder>, config: MatchConfig) -> Self {
        // Every domain plus "all".
        let capacity = dataset.domains().count() as u64 + 1;
        Self {
            dataset,
            encoder,
            config,
            engines: Cache::builder().max_capacity(capacity).build(),
            builds: AtomicUsize::new(0),
        }
    }

    /// Maps a requested domain to a registry key.
    ///
    /// Trimmed and lowercased; missing or unknown domains fall back to `"all"`.
    pub fn resolve_domain(&self, requested: Option<&str>) -> String {
        let Some(requested) = requested else {
            return ALL_DOMAINS.to_string();
        };

        let key = requested.trim().to_lowercase();
        if self.dataset.has_domain(&key) {
            key
        } else {
            if key != ALL_DOMAINS {
                debug!(requested = %key, "Unknown domain, falling back to all");
            }
            ALL_DOMAINS.to_string()
        }
    }

    /// Returns the engine for `domain`, building it on first use.
    ///
    /// Concurrent callers for the same key wait on a single build. Blocking: call from
    /// `spawn_blocking` in async contexts.
    pub fn engine(&self, domain: &str) -> Result<Arc<MatchingEngine>, Arc<BuildError>> {
        self.engines
            .try_get_with(domain.to_string(), || self.build(domain))
    }

    /// Number of engine builds attempted so far.
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    pub fn dataset(&self) -> &FaqDataset {
        &self.dataset
    }

    pub fn encoder(&self) -> &Arc<VectorEncoder> {
        &self.encoder
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    fn build(&self, domain: &str) -> Result<Arc<MatchingEngine>, BuildError> {
        self.builds.fetch_add(1, Ordering::Relaxed);

        let entries = self.dataset.entries(Some(domain))?;
        let engine = MatchingEngine::new(Arc::clone(&self.encoder), entries, self.config)?;

        info!(domain, entries = engine.len(), "Domain engine ready");
        Ok(Arc::new(engine))
    }
}
