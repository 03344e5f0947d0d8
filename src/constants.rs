//! Cross-cutting, shared constants.
//!
//! The threshold and top-K values are example-tuned defaults, not semantics. Everything
//! that consumes them takes the value from configuration.

/// Sentence-transformer used when no model is configured.
pub const DEFAULT_MODEL_NAME: &str = "all-MiniLM-L6-v2";

/// Directory that model identifiers are resolved against.
pub const DEFAULT_MODELS_DIR: &str = "./.models";

/// Output dimension of the default model (and of the stub encoder).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Token limit of the default model's position embeddings.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Texts per forward pass during bulk encoding.
pub const DEFAULT_BATCH_SIZE: usize = 32;

/// Minimum best score for a match to count as confident.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.3;

/// Matches returned when the caller does not ask for a count.
pub const DEFAULT_TOP_K: usize = 3;

/// FAQ dataset location used by the console and server when nothing is configured.
pub const DEFAULT_FAQ_PATH: &str = "data/samples/faq.json";

/// Domain key that selects every domain in a dataset.
pub const ALL_DOMAINS: &str = "all";

/// Tolerance used when checking that a vector has unit norm.
pub const UNIT_NORM_TOLERANCE: f32 = 1e-5;

/// Returns `true` if `threshold` is a valid cosine-similarity threshold.
#[inline]
pub fn is_valid_threshold(threshold: f32) -> bool {
    (0.0..=1.0).contains(&threshold)
}
