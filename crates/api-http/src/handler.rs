//! HTTP Handlers and Router

use crate::error::ApiError;
use crate::extract::{DispatchInput, MAX_BODY_BYTES};
use crate::types::{HealthResponse, HealthStatus};
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::warn;
use userq_core::application::UserJobService;

/// Shared state injected into every handler
#[derive(Clone)]
pub struct AppState {
    service: Arc<UserJobService>,
    started_at: Instant,
}

impl AppState {
    pub fn new(service: Arc<UserJobService>) -> Self {
        Self {
            service,
            started_at: Instant::now(),
        }
    }
}

/// Build the router with all routes and request tracing
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/dispatch", get(dispatch_jobs).post(dispatch_jobs))
        .route("/jobs/dispatch", get(dispatch_jobs).post(dispatch_jobs))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET|POST /dispatch
///
/// Submits one per-user job and answers `Jobs dispatched for user: <id>`.
pub async fn dispatch_jobs(
    State(state): State<AppState>,
    DispatchInput(req): DispatchInput,
) -> Result<String, ApiError> {
    let outcome = state.service.dispatch(req).await?;
    Ok(outcome.acknowledgement())
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, code, message) = match state.service.health_check().await {
        Ok(()) => (HealthStatus::Up, StatusCode::OK, None),
        Err(e) => {
            warn!(error = %e, "Queue backend health check failed");
            (
                HealthStatus::Down,
                StatusCode::SERVICE_UNAVAILABLE,
                Some(e.to_string()),
            )
        }
    };

    let body = HealthResponse {
        status,
        version: userq_core::VERSION.to_string(),
        queue_backend: state.service.backend_name().to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        message,
    };

    (code, Json(body))
}
