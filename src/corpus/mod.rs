//! FAQ corpus loading.
//!
//! A dataset is a JSON object mapping a domain key to a list of question/answer items:
//!
//! ```json
//! { "support": [{ "question": "How do I reset my password?", "answer": "..." }] }
//! ```
//!
//! Questions are normalized with [`normalize_text`] on the way out; answers are carried
//! unchanged as opaque metadata.

pub mod error;
pub mod normalize;

pub use error::CorpusError;
pub use normalize::normalize_text;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::constants::ALL_DOMAINS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

/// Parsed FAQ dataset, keyed by domain (iterated in key order).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaqDataset {
    domains: BTreeMap<String, Vec<FaqItem>>,
}

impl FaqDataset {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CorpusError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let dataset = Self::from_json_str(&content)?;
        debug!(
            path = %path.display(),
            domains = dataset.domains.len(),
            "FAQ dataset loaded"
        );
        Ok(dataset)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CorpusError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Domain keys present in the dataset.
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.domains.keys().map(String::as_str)
    }

    pub fn has_domain(&self, domain: &str) -> bool {
        self.domains.contains_key(domain)
    }

    /// Returns `(normalized question, answer)` pairs for one domain, or for every domain
    /// when `domain` is `None` or `"all"`.
    pub fn entries(&self, domain: Option<&str>) -> Result<Vec<(String, String)>, CorpusError> {
        let items: Vec<&FaqItem> = match domain {
            None | Some(ALL_DOMAINS) => self.domains.values().flatten().collect(),
            Some(key) => self
                .domains
                .get(key)
                .ok_or_else(|| CorpusError::UnknownDomain {
                    domain: key.to_string(),
                    known: self.domains.keys().cloned().collect(),
                })?
                .iter()
                .collect(),
        };

        if items.is_empty() {
            return Err(CorpusError::Empty);
        }

        Ok(items
            .into_iter()
            .map(|item| (normalize_text(&item.question), item.answer.clone()))
            .collect())
    }
}
