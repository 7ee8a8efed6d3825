//! Health check HTTP route handlers
//!
//! Provides endpoints for checking the health of the API and its storage:
//! - `GET /health` - Simple liveness check (returns 200 OK)
//! - `GET /health/ready` - Readiness check (pings the repository)
//! - `GET /health/live` - Kubernetes-style liveness probe

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use std::sync::Arc;

use crate::repositories::EntityRepository;
use crate::services::HealthService;

/// Shared application state for health check handlers
#[derive(Clone)]
pub struct HealthState {
    /// Health check service
    pub health_service: Arc<HealthService>,
}

impl HealthState {
    /// Create new health state for a repository
    pub fn new(repository: Arc<dyn EntityRepository>) -> Self {
        Self {
            health_service: Arc::new(HealthService::new(repository)),
        }
    }
}

/// Create health check router
pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/", get(simple_health))
        .route("/live", get(liveness_probe))
        .route("/ready", get(readiness_probe))
        .with_state(state)
}

/// Simple health check - always returns OK if the server is running
async fn simple_health() -> &'static str {
    "OK"
}

/// Liveness probe for Kubernetes
///
/// Returns 200 if the server process is running and can handle requests.
/// Does not touch the storage backend.
async fn liveness_probe() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness probe - checks the storage backend
///
/// # Response
/// - 200 OK if the repository answers
/// - 503 Service Unavailable otherwise
async fn readiness_probe(State(state): State<HealthState>) -> impl IntoResponse {
    let response = state.health_service.check_all().await;

    let status_code = if response.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simple_health() {
        let response = simple_health().await;
        assert_eq!(response, "OK");
    }

    #[tokio::test]
    async fn test_liveness_probe() {
        let response = liveness_probe().await;
        let json = response.into_response();
        assert_eq!(json.status(), StatusCode::OK);
    }
}
