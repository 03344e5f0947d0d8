//! Request/response bodies for `POST /match`.

use serde::{Deserialize, Serialize};

use semmatch::MatchResult;

#[derive(Debug, Clone, Deserialize)]
pub struct MatchRequest {
    pub query: String,

    #[serde(default)]
    pub domain: Option<String>,

    /// Signed so that negative values reach validation instead of failing to parse.
    #[serde(default)]
    pub top_k: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchItem {
    pub question: String,
    pub answer: String,
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResponse {
    pub domain: String,
    pub best_score: f32,
    pub meets_threshold: bool,
    pub matches: Vec<MatchItem>,
}

impl MatchResponse {
    pub fn from_result(domain: String, result: &MatchResult<'_, String>) -> Self {
        Self {
            domain,
            best_score: result.best_score,
            meets_threshold: result.meets_threshold,
            matches: result
                .matches
                .iter()
                .map(|m| MatchItem {
                    question: m.text.to_string(),
                    answer: m.metadata.clone(),
                    score: m.score,
                })
                .collect(),
        }
    }
}
