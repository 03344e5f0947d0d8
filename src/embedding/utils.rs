use std::io;
use std::path::Path;
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

/// Files a sentence-embedding model directory must contain.
pub const REQUIRED_MODEL_FILES: [&str; 3] = ["config.json", "model.safetensors", "tokenizer.json"];

/// Returns the first required file missing from `model_dir`, if any.
pub fn missing_model_file(model_dir: &Path) -> Option<&'static str> {
    REQUIRED_MODEL_FILES
        .into_iter()
        .find(|name| !model_dir.join(name).is_file())
}

/// Loads `tokenizer.json` from a model directory, truncating to `max_len` tokens and
/// padding each batch to its longest member.
pub fn load_batch_tokenizer(model_dir: &Path, max_len: usize) -> io::Result<Tokenizer> {
    let mut tokenizer =
        Tokenizer::from_file(model_dir.join("tokenizer.json")).map_err(io::Error::other)?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };
    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| io::Error::other(format!("Failed to configure truncation: {}", e)))?;

    tokenizer.with_padding(Some(PaddingParams {
        strategy: PaddingStrategy::BatchLongest,
        ..Default::default()
    }));

    Ok(tokenizer)
}
