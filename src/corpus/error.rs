use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("FAQ dataset not found at: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read FAQ dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse FAQ dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown domain '{domain}', expected one of: {known:?} or 'all'")]
    UnknownDomain { domain: String, known: Vec<String> },

    #[error("no questions were loaded from the FAQ dataset")]
    Empty,
}
