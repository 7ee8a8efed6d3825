//! Member graph API library
//!
//! GraphQL API over member types, users, profiles, posts and user
//! subscriptions, with per-request batched relation loading. This module
//! exposes the core API components for use in integration tests and as a
//! library.

pub mod config;
pub mod error;
pub mod graphql;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{ApiError, ApiResult};
pub use graphql::{build_schema, ApiSchema, SchemaBuilder};
pub use repositories::{EntityRepository, MemoryRepository, PgRepository};
