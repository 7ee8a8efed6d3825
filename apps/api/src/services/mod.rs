//! Business logic services

pub mod health;

pub use health::{HealthCheckResponse, HealthService, ServiceHealth, ServiceStatus};
