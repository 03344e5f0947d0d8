use std::path::PathBuf;

use crate::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_SEQ_LEN, DEFAULT_MODEL_NAME,
    DEFAULT_MODELS_DIR,
};
use crate::embedding::error::EmbeddingError;

#[derive(Debug, Clone, PartialEq)]
/// Configuration for [`VectorEncoder`](super::VectorEncoder).
pub struct EncoderConfig {
    /// Model identifier: a model directory, or a name resolved under `models_dir`.
    pub model: String,
    /// Directory that bare model names are resolved against.
    pub models_dir: PathBuf,
    /// Scale every output vector to unit L2 norm.
    pub normalize: bool,
    /// Max tokens per text (longer inputs are truncated).
    pub max_seq_len: usize,
    /// Texts per forward pass in [`encode_batch`](super::VectorEncoder::encode_batch).
    pub batch_size: usize,
    /// Output dimension of the stub backend (the model backend reports its own).
    pub stub_dim: usize,
    /// If true, run in deterministic stub mode (no model files required).
    pub testing_stub: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL_NAME.to_string(),
            models_dir: PathBuf::from(DEFAULT_MODELS_DIR),
            normalize: true,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            batch_size: DEFAULT_BATCH_SIZE,
            stub_dim: DEFAULT_EMBEDDING_DIM,
            testing_stub: false,
        }
    }
}

impl EncoderConfig {
    /// Creates a config for the given model identifier.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files; produces deterministic embeddings).
    pub fn stub() -> Self {
        Self {
            model: "stub".to_string(),
            testing_stub: true,
            ..Default::default()
        }
    }

    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn with_models_dir(mut self, models_dir: impl Into<PathBuf>) -> Self {
        self.models_dir = models_dir.into();
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Resolves the model identifier to a directory.
    ///
    /// An identifier that already names a directory wins over `models_dir/<model>`.
    pub fn model_dir(&self) -> PathBuf {
        let direct = PathBuf::from(&self.model);
        if direct.is_dir() {
            direct
        } else {
            self.models_dir.join(&self.model)
        }
    }

    /// Validates numeric limits and the model identifier.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.batch_size == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "batch_size must be at least 1".to_string(),
            });
        }

        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be at least 1".to_string(),
            });
        }

        if self.testing_stub {
            if self.stub_dim == 0 {
                return Err(EmbeddingError::InvalidConfig {
                    reason: "stub_dim must be at least 1".to_string(),
                });
            }
            return Ok(());
        }

        if self.model.trim().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model identifier is required (stubbing is disabled)".to_string(),
            });
        }

        Ok(())
    }
}
