//! Vector encoder: sentence-transformer (safetensors + tokenizer) or deterministic stub.
//!
//! Use [`EncoderConfig::stub`] for tests/examples without model files.

/// Encoder configuration.
pub mod config;


pub use config::EncoderConfig;

use candle_core::{Device, Tensor};
use tracing::{debug, info, warn};

use crate::embedding::bert::SentenceBert;
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::{load_batch_tokenizer, missing_model_file};
use crate::ranking::l2_norm;

/// A fixed-length text embedding.
pub type Embedding = Vec<f32>;

enum EncoderBackend {
    Model {
        model: SentenceBert,
        tokenizer: tokenizers::Tokenizer,
        device: Device,
    },
    Stub,
}

/// Turns text into fixed-dimension vectors.
///
/// The backend is loaded once in [`VectorEncoder::load`]; encoding takes `&self` and never
/// touches the configuration, so one encoder can serve many threads. The model backend is
/// deterministic; the stub backend is deterministic by construction.
pub struct VectorEncoder {
    backend: EncoderBackend,
    config: EncoderConfig,
    dim: usize,
}

impl std::fmt::Debug for VectorEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorEncoder")
            .field(
                "backend",
                &match &self.backend {
                    EncoderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EncoderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("model", &self.config.model)
            .field("dim", &self.dim)
            .field("normalize", &self.config.normalize)
            .finish()
    }
}

impl VectorEncoder {
    /// Loads the encoder backend described by `config`.
    ///
    /// Fails with [`EmbeddingError::ModelUnavailable`] if the model directory, weights or
    /// tokenizer cannot be loaded.
    pub fn load(config: EncoderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("Vector encoder running in STUB mode (testing only)");
            return Ok(Self {
                backend: EncoderBackend::Stub,
                dim: config.stub_dim,
                config,
            });
        }

        let device = select_device();
        debug!(?device, "Selected compute device for encoder");

        let (model, tokenizer) = Self::load_model(&config, &device)?;
        let dim = model.hidden_size();

        info!(
            model = %config.model,
            model_dir = %config.model_dir().display(),
            embedding_dim = dim,
            max_seq_len = config.max_seq_len,
            normalize = config.normalize,
            "Sentence embedding model loaded"
        );

        Ok(Self {
            backend: EncoderBackend::Model {
                model,
                tokenizer,
                device,
            },
            config,
            dim,
        })
    }

    fn load_model(
        config: &EncoderConfig,
        device: &Device,
    ) -> Result<(SentenceBert, tokenizers::Tokenizer), EmbeddingError> {
        let model_dir = config.model_dir();

        if !model_dir.is_dir() {
            return Err(EmbeddingError::unavailable(
                &config.model,
                format!("model directory not found: {}", model_dir.display()),
            ));
        }

        if let Some(missing) = missing_model_file(&model_dir) {
            return Err(EmbeddingError::unavailable(
                &config.model,
                format!("missing {} in {}", missing, model_dir.display()),
            ));
        }

        let tokenizer = load_batch_tokenizer(&model_dir, config.max_seq_len).map_err(|e| {
            EmbeddingError::unavailable(&config.model, format!("failed to load tokenizer: {}", e))
        })?;

        let model = SentenceBert::load(&model_dir, device).map_err(|e| {
            EmbeddingError::unavailable(&config.model, format!("failed to load weights: {}", e))
        })?;

        Ok((model, tokenizer))
    }

    /// Encodes a single text.
    pub fn encode(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let mut vectors = self.encode_batch(&[text])?;
        vectors.pop().ok_or_else(|| EmbeddingError::InferenceFailed {
            reason: "encoder returned no vector for a single input".to_string(),
        })
    }

    /// Encodes many texts, one forward pass per `batch_size` chunk.
    ///
    /// Output order matches input order.
    pub fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let mut out = Vec::with_capacity(texts.len());
        for (chunk_idx, chunk) in texts.chunks(self.config.batch_size).enumerate() {
            let raw = match &self.backend {
                EncoderBackend::Model {
                    model,
                    tokenizer,
                    device,
                } => Self::forward_chunk(chunk, model, tokenizer, device)?,
                EncoderBackend::Stub => chunk.iter().map(|t| self.embed_stub(t)).collect(),
            };

            let offset = chunk_idx * self.config.batch_size;
            for (i, vector) in raw.into_iter().enumerate() {
                out.push(self.finalize(vector, offset + i)?);
            }
        }

        debug!(count = out.len(), dim = self.dim, "Encoded texts");
        Ok(out)
    }

    fn forward_chunk(
        texts: &[&str],
        model: &SentenceBert,
        tokenizer: &tokenizers::Tokenizer,
        device: &Device,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let encodings = tokenizer.encode_batch(texts.to_vec(), true).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: e.to_string(),
            }
        })?;

        let batch = encodings.len();
        let seq_len = encodings.first().map_or(0, |e| e.get_ids().len());

        let mut ids = Vec::with_capacity(batch * seq_len);
        let mut mask = Vec::with_capacity(batch * seq_len);
        for encoding in &encodings {
            ids.extend_from_slice(encoding.get_ids());
            mask.extend_from_slice(encoding.get_attention_mask());
        }

        debug!(batch, seq_len, "Running transformer forward pass");

        let input_ids = Tensor::from_vec(ids, (batch, seq_len), device)?;
        let attention_mask = Tensor::from_vec(mask, (batch, seq_len), device)?;

        let pooled = model.embed(&input_ids, &attention_mask)?;
        Ok(pooled.to_device(&Device::Cpu)?.to_vec2::<f32>()?)
    }

    fn embed_stub(&self, text: &str) -> Vec<f32> {
        let hash = blake3::hash(text.as_bytes());
        let mut seed = [0u8; 8];
        seed.copy_from_slice(&hash.as_bytes()[..8]);
        let mut state = u64::from_le_bytes(seed);

        (0..self.dim)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0
            })
            .collect()
    }

    fn finalize(&self, mut vector: Vec<f32>, index: usize) -> Result<Embedding, EmbeddingError> {
        if !self.config.normalize {
            return Ok(vector);
        }

        let norm = l2_norm(&vector);
        if norm == 0.0 || !norm.is_finite() {
            return Err(EmbeddingError::DegenerateVector { index, norm });
        }

        for x in &mut vector {
            *x /= norm;
        }
        Ok(vector)
    }

    /// Returns the output embedding dimension.
    pub fn embedding_dim(&self) -> usize {
        self.dim
    }

    /// Returns `true` if vectors are scaled to unit norm.
    pub fn normalizes(&self) -> bool {
        self.config.normalize
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EncoderBackend::Stub)
    }

    /// Returns the encoder configuration.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }
}
