//! HTTP gateway (Axum) for FAQ matching.
//!
//! This module is primarily used by the `semmatch-server` binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod registry;
pub mod state;


use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use handler::match_handler;
pub use registry::EngineRegistry;
pub use state::HandlerState;

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/match", post(match_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
    pub usage: &'static str,
    pub endpoints: [&'static str; 2],
}

#[tracing::instrument]
pub async fn root_handler() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "SemMatch API is running.",
        usage: "POST /match with {\"query\": string, \"domain\"?: string, \"top_k\"?: int}",
        endpoints: ["/match", "/health"],
    })
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (StatusCode::OK, Json(HealthResponse { status: "ok" })).into_response()
}
