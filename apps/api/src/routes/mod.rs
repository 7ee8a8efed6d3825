//! HTTP route handlers
//!
//! This module contains the HTTP surface of the API:
//! - GraphQL endpoint and playground
//! - Health check and readiness endpoints

pub mod graphql;
pub mod health;

pub use graphql::graphql_router;
pub use health::{health_router, HealthState};

use axum::{
    http::{header, Method},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::graphql::ApiSchema;

/// Build the application router with tracing and CORS layers
pub fn build_router(schema: ApiSchema, config: &Config) -> Router {
    let health_state = HealthState::new(schema.repository().clone());

    Router::new()
        .route("/", axum::routing::get(root))
        // GraphQL endpoints: POST /graphql, GET /graphql (playground)
        .merge(graphql_router(schema, config.graphql.playground))
        // Nested health routes: /health, /health/live, /health/ready
        .nest("/health", health_router(health_state))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(config))
}

/// Build the CORS layer based on configuration.
///
/// In production mode:
/// - If `CORS_ORIGINS` is set, only those origins are allowed
/// - If `CORS_ORIGINS` is not set, CORS requests are rejected (no origins allowed)
///
/// In development mode:
/// - If `CORS_ORIGINS` is set, those origins are used
/// - If `CORS_ORIGINS` is not set, permissive CORS is used for convenience
pub fn build_cors_layer(config: &Config) -> CorsLayer {
    match &config.cors_allowed_origins {
        Some(origins) if !origins.is_empty() => {
            let allowed_origins: Vec<_> = origins
                .iter()
                .filter_map(|origin| {
                    origin.parse().ok().or_else(|| {
                        tracing::warn!("Invalid CORS origin '{}', skipping", origin);
                        None
                    })
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::error!("No valid CORS origins configured, CORS requests will be rejected");
                CorsLayer::new()
            } else {
                tracing::info!(
                    "CORS configured with {} allowed origin(s): {:?}",
                    allowed_origins.len(),
                    origins
                );
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
                    .max_age(std::time::Duration::from_secs(3600))
            }
        }
        _ if config.is_production() => {
            tracing::warn!(
                "CORS_ORIGINS not configured in production mode. \
                 CORS requests will be rejected."
            );
            CorsLayer::new()
        }
        _ => {
            tracing::warn!("Using permissive CORS in development mode");
            CorsLayer::permissive()
        }
    }
}

async fn root() -> &'static str {
    "member-graph API: POST GraphQL operations to /graphql"
}
