//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `SEMMATCH_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_FAQ_PATH, DEFAULT_MODEL_NAME, DEFAULT_MODELS_DIR, DEFAULT_SIMILARITY_THRESHOLD,
    DEFAULT_TOP_K, is_valid_threshold,
};
use crate::embedding::EncoderConfig;
use crate::matching::MatchConfig;

/// Service configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SEMMATCH_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// FAQ dataset file. Default: `data/samples/faq.json`.
    pub faq_path: PathBuf,

    /// Model identifier (directory, or name under `models_dir`). Default: `all-MiniLM-L6-v2`.
    pub model: String,

    /// Directory bare model names resolve against. Default: `./.models`.
    pub models_dir: PathBuf,

    /// Unit-normalize embeddings. Default: `true`.
    pub normalize: bool,

    /// Similarity threshold in `[0, 1]`. Default: `0.3`.
    pub threshold: f32,

    /// Matches returned when a request does not say. Default: `3`.
    pub top_k: usize,

    /// Run the deterministic stub encoder instead of a model. Default: `false`.
    pub stub_embedder: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            faq_path: PathBuf::from(DEFAULT_FAQ_PATH),
            model: DEFAULT_MODEL_NAME.to_string(),
            models_dir: PathBuf::from(DEFAULT_MODELS_DIR),
            normalize: true,
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            top_k: DEFAULT_TOP_K,
            stub_embedder: false,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "SEMMATCH_PORT";
    const ENV_BIND_ADDR: &'static str = "SEMMATCH_BIND_ADDR";
    const ENV_FAQ_PATH: &'static str = "SEMMATCH_FAQ_PATH";
    const ENV_MODEL: &'static str = "SEMMATCH_MODEL";
    const ENV_MODELS_DIR: &'static str = "SEMMATCH_MODELS_DIR";
    const ENV_NORMALIZE: &'static str = "SEMMATCH_NORMALIZE";
    const ENV_THRESHOLD: &'static str = "SEMMATCH_THRESHOLD";
    const ENV_TOP_K: &'static str = "SEMMATCH_TOP_K";
    const ENV_STUB_EMBEDDER: &'static str = "SEMMATCH_STUB_EMBEDDER";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let faq_path = Self::parse_path_from_env(Self::ENV_FAQ_PATH, defaults.faq_path);
        let model = Self::parse_string_from_env(Self::ENV_MODEL, defaults.model);
        let models_dir = Self::parse_path_from_env(Self::ENV_MODELS_DIR, defaults.models_dir);
        let normalize = Self::parse_bool_from_env(Self::ENV_NORMALIZE, defaults.normalize)?;
        let threshold = Self::parse_threshold_from_env(defaults.threshold)?;
        let top_k = Self::parse_top_k_from_env(defaults.top_k)?;
        let stub_embedder =
            Self::parse_bool_from_env(Self::ENV_STUB_EMBEDDER, defaults.stub_embedder)?;

        Ok(Self {
            port,
            bind_addr,
            faq_path,
            model,
            models_dir,
            normalize,
            threshold,
            top_k,
            stub_embedder,
        })
    }

    /// Validates paths and value ranges (does not load anything).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.faq_path.exists() {
            return Err(ConfigError::PathNotFound {
                path: self.faq_path.clone(),
            });
        }
        if !self.faq_path.is_file() {
            return Err(ConfigError::NotAFile {
                path: self.faq_path.clone(),
            });
        }

        if self.models_dir.exists() && !self.models_dir.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.models_dir.clone(),
            });
        }

        if !is_valid_threshold(self.threshold) {
            return Err(ConfigError::InvalidThreshold {
                value: self.threshold.to_string(),
            });
        }

        if self.top_k == 0 {
            return Err(ConfigError::InvalidTopK {
                value: self.top_k.to_string(),
            });
        }

        if !self.stub_embedder && self.model.trim().is_empty() {
            return Err(ConfigError::MissingEnvVar {
                name: Self::ENV_MODEL,
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Encoder settings derived from this config.
    pub fn encoder_config(&self) -> EncoderConfig {
        let base = if self.stub_embedder {
            EncoderConfig::stub()
        } else {
            EncoderConfig::new(self.model.clone())
        };
        base.with_models_dir(self.models_dir.clone())
            .with_normalize(self.normalize)
    }

    pub fn match_config(&self) -> MatchConfig {
        MatchConfig::default()
            .with_threshold(self.threshold)
            .with_default_top_k(self.top_k)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_threshold_from_env(default: f32) -> Result<f32, ConfigError> {
        match env::var(Self::ENV_THRESHOLD) {
            Ok(value) => match value.trim().parse::<f32>() {
                Ok(threshold) if is_valid_threshold(threshold) => Ok(threshold),
                _ => Err(ConfigError::InvalidThreshold { value }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_top_k_from_env(default: usize) -> Result<usize, ConfigError> {
        match env::var(Self::ENV_TOP_K) {
            Ok(value) => match value.trim().parse::<usize>() {
                Ok(top_k) if top_k > 0 => Ok(top_k),
                _ => Err(ConfigError::InvalidTopK { value }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_bool_from_env(var_name: &'static str, default: bool) -> Result<bool, ConfigError> {
        match env::var(var_name) {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidBool {
                    name: var_name,
                    value,
                }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(default)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }
}
