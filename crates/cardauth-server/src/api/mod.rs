//! API module for the authenticator server

pub mod error;
pub mod handlers;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::storage::UserStore;
use handlers::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Readiness check response
#[derive(Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub debug_mode: bool,
    pub platform_url: String,
    pub user_count: usize,
}

/// Health check endpoint
///
/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Readiness check endpoint
///
/// GET /ready
pub async fn ready(State(state): State<Arc<AppState>>) -> Json<ReadyResponse> {
    let user_count = state.users.count().await;

    Json(ReadyResponse {
        ready: user_count.is_ok(),
        debug_mode: state.config.debug_mode,
        platform_url: state.config.platform_url.clone(),
        user_count: user_count.unwrap_or(0),
    })
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Card readers post from browser pages served elsewhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health endpoints
        .route("/health", get(health))
        .route("/ready", get(ready))
        // Authentication endpoints
        .route("/v1/auth/challenge", post(handlers::issue_challenge))
        .route(
            "/v1/auth/{session_id}",
            get(handlers::session_status).post(handlers::authenticate),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
