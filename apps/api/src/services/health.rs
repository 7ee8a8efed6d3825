//! Health check service for verifying the storage backend

use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::repositories::EntityRepository;

/// Status of an individual service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    /// Service is healthy and responding
    Healthy,
    /// Service is unhealthy or unreachable
    Unhealthy,
}

/// Result of a single service health check
#[derive(Debug, Clone, Serialize)]
pub struct ServiceHealth {
    /// Name of the service
    pub name: &'static str,
    /// Current status
    pub status: ServiceStatus,
    /// Response time in milliseconds
    pub response_time_ms: u64,
    /// Error message if unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Backend serving the check
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<&'static str>,
}

impl ServiceHealth {
    /// Create a healthy service result
    pub fn healthy(name: &'static str, response_time: Duration) -> Self {
        Self {
            name,
            status: ServiceStatus::Healthy,
            response_time_ms: response_time.as_millis() as u64,
            error: None,
            backend: None,
        }
    }

    /// Create an unhealthy service result
    pub fn unhealthy(name: &'static str, error: impl Into<String>, response_time: Duration) -> Self {
        Self {
            name,
            status: ServiceStatus::Unhealthy,
            response_time_ms: response_time.as_millis() as u64,
            error: Some(error.into()),
            backend: None,
        }
    }

    fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }
}

/// Aggregated health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthCheckResponse {
    /// Overall status (healthy only if all services are healthy)
    pub status: ServiceStatus,
    /// Individual service health results
    pub services: Vec<ServiceHealth>,
    /// Total time to complete all health checks
    pub total_time_ms: u64,
    /// API version
    pub version: &'static str,
}

impl HealthCheckResponse {
    /// Create a new health check response from individual service results
    pub fn new(services: Vec<ServiceHealth>, total_time: Duration) -> Self {
        let status = if services.iter().all(|s| s.status == ServiceStatus::Healthy) {
            ServiceStatus::Healthy
        } else {
            ServiceStatus::Unhealthy
        };

        Self {
            status,
            services,
            total_time_ms: total_time.as_millis() as u64,
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    /// Check if overall health is good
    pub fn is_healthy(&self) -> bool {
        self.status == ServiceStatus::Healthy
    }
}

/// Health check service for the entity repository
pub struct HealthService {
    repository: Arc<dyn EntityRepository>,
}

impl HealthService {
    pub fn new(repository: Arc<dyn EntityRepository>) -> Self {
        Self { repository }
    }

    /// Check that the repository can serve queries
    pub async fn check_storage(&self) -> ServiceHealth {
        let start = Instant::now();
        let backend = self.repository.backend();

        match self.repository.ping().await {
            Ok(()) => ServiceHealth::healthy("storage", start.elapsed()).with_backend(backend),
            Err(e) => {
                tracing::warn!(error = %e, backend, "Storage health check failed");
                ServiceHealth::unhealthy("storage", format!("Ping failed: {}", e), start.elapsed())
                    .with_backend(backend)
            }
        }
    }

    /// Run every check
    pub async fn check_all(&self) -> HealthCheckResponse {
        let start = Instant::now();
        let services = vec![self.check_storage().await];
        HealthCheckResponse::new(services, start.elapsed())
    }
}
