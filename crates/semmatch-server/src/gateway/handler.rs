use axum::{Json, extract::State};
use tracing::{debug, instrument};

use semmatch::normalize_text;

use crate::gateway::error::GatewayError;
use crate::gateway::payload::{MatchRequest, MatchResponse};
use crate::gateway::state::HandlerState;

#[instrument(skip(state, request), fields(domain = tracing::field::Empty))]
pub async fn match_handler(
    State(state): State<HandlerState>,
    Json(request): Json<serde_json::Value>,
) -> Result<Json<MatchResponse>, GatewayError> {
    let request: MatchRequest = serde_json::from_value(request)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))?;

    let top_k = resolve_top_k(request.top_k, state.default_top_k)?;
    let domain = state.registry.resolve_domain(request.domain.as_deref());
    tracing::Span::current().record("domain", tracing::field::display(&domain));

    let query = normalize_text(&request.query);
    debug!(top_k, query_len = query.len(), "Processing match request");

    let registry = state.registry.clone();
    let response = tokio::task::spawn_blocking(move || {
        let engine = registry
            .engine(&domain)
            .map_err(|e| GatewayError::EngineUnavailable {
                domain: domain.clone(),
                reason: e.to_string(),
            })?;
        let result = engine.match_query(&query, top_k)?;
        Ok::<_, GatewayError>(MatchResponse::from_result(domain, &result))
    })
    .await
    .map_err(|e| GatewayError::InternalError(format!("Match task failed: {}", e)))??;

    Ok(Json(response))
}

pub(crate) fn resolve_top_k(requested: Option<i64>, default: usize) -> Result<usize, GatewayError> {
    match requested {
        None => Ok(default),
        Some(k) if k >= 1 => usize::try_from(k)
            .map_err(|_| GatewayError::InvalidRequest(format!("top_k out of range: {}", k))),
        Some(k) => Err(GatewayError::InvalidRequest(format!(
            "top_k must be >= 1, got {}",
            k
        ))),
    }
}
