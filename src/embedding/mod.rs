//! Embedding + model utilities.
//!
//! - [`encoder`] turns text into fixed-dimension vectors.
//! - [`bert`] is the sentence-transformer backbone the encoder runs.

/// BERT backbone with mean pooling.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
/// Vector encoder (model or stub backend).
pub mod encoder;
mod error;
/// Tokenizer/model-directory helpers.
pub mod utils;

pub use encoder::{Embedding, EncoderConfig, VectorEncoder};
pub use error::EmbeddingError;
