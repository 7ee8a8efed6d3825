//! Error handling for the member graph API
//!
//! This module provides the service-level error type using thiserror, with
//! HTTP status classification and a conversion into GraphQL field errors
//! carrying a machine-readable `code` extension.

use std::sync::Arc;

use async_graphql::ErrorExtensions;
use axum::http::StatusCode;
use thiserror::Error;

use crate::repositories::RepositoryError;

/// Main API error type
#[derive(Error, Debug)]
pub enum ApiError {
    // ========== Resource Errors ==========
    /// Requested resource not found
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Resource already exists (conflict)
    #[error("{resource_type} already exists: {id}")]
    Conflict {
        resource_type: &'static str,
        id: String,
    },

    // ========== Validation Errors ==========
    /// Request validation failed
    #[error("validation error: {0}")]
    ValidationError(String),

    // ========== Database Errors ==========
    /// Database query failed
    #[error("database error: {0}")]
    Database(String),

    /// Storage backend cannot serve requests
    #[error("database connection unavailable: {0}")]
    DatabaseUnavailable(String),

    // ========== Internal Errors ==========
    /// Internal server error (catch-all for unexpected errors)
    #[error("internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::DatabaseUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for client-side handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict { .. } => "CONFLICT",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::DatabaseUnavailable(_) => "DATABASE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Create a not found error for a specific resource
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// Message safe to hand to API clients; server-side details stay in the logs
    pub fn client_message(&self) -> String {
        if self.status_code().is_server_error() {
            "An unexpected error occurred".to_string()
        } else {
            self.to_string()
        }
    }

    /// Log the error with appropriate severity based on status code
    pub fn log(&self) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Server error occurred"
            );
        } else {
            tracing::debug!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Client error"
            );
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        self.log();

        let code = self.error_code();
        async_graphql::Error::new(self.client_message()).extend_with(|_, e| e.set("code", code))
    }
}

/// Convert anything that maps onto [`ApiError`] into a GraphQL field error
pub fn to_graphql_error(error: impl Into<ApiError>) -> async_graphql::Error {
    error.into().extend()
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

// ========== Conversion Implementations ==========

impl From<&RepositoryError> for ApiError {
    fn from(err: &RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => Self::NotFound {
                resource_type: *entity,
                id: id.clone(),
            },
            RepositoryError::Conflict { entity, detail } => Self::Conflict {
                resource_type: *entity,
                id: detail.clone(),
            },
            RepositoryError::InvalidReference { entity, detail } => {
                Self::ValidationError(format!("{}: {}", entity, detail))
            }
            RepositoryError::Database(sqlx::Error::PoolTimedOut) => {
                Self::DatabaseUnavailable("connection pool timed out".to_string())
            }
            RepositoryError::Database(e) => Self::Database(e.to_string()),
            RepositoryError::Unavailable(msg) => Self::DatabaseUnavailable(msg.clone()),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        Self::from(&err)
    }
}

/// Batched loads hand the same failure to every waiting parent
impl From<Arc<RepositoryError>> for ApiError {
    fn from(err: Arc<RepositoryError>) -> Self {
        Self::from(err.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::not_found("post", "123").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::ValidationError("test".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::DatabaseUnavailable("down".to_string()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_repository_errors_map_onto_api_errors() {
        let err: ApiError = RepositoryError::not_found("user", "abc").into();
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert_eq!(err.to_string(), "user not found: abc");

        let err: ApiError = RepositoryError::Conflict {
            entity: "profile",
            detail: "duplicate".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::CONFLICT);

        let err: ApiError = RepositoryError::InvalidReference {
            entity: "post",
            detail: "author missing".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_shared_repository_errors_map_like_owned_ones() {
        let shared = Arc::new(RepositoryError::Database(sqlx::Error::Protocol(
            "relation \"users\" does not exist".to_string(),
        )));

        let first = ApiError::from(Arc::clone(&shared));
        let second = ApiError::from(shared);

        assert_eq!(first.error_code(), "DATABASE_ERROR");
        assert_eq!(first.client_message(), "An unexpected error occurred");
        assert_eq!(second.error_code(), first.error_code());

        let err = ApiError::from(Arc::new(RepositoryError::Unavailable("down".to_string())));
        assert_eq!(err.error_code(), "DATABASE_UNAVAILABLE");
    }

    #[test]
    fn test_server_errors_hide_details_from_clients() {
        let err = ApiError::Internal("secret stack trace".to_string());
        assert_eq!(err.client_message(), "An unexpected error occurred");

        let err = ApiError::not_found("post", "42");
        assert_eq!(err.client_message(), "post not found: 42");
    }

    #[test]
    fn test_graphql_error_carries_code() {
        let gql = to_graphql_error(ApiError::not_found("user", "1"));
        assert_eq!(gql.message, "user not found: 1");
        let code = gql
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned();
        assert_eq!(code, Some(async_graphql::Value::from("NOT_FOUND")));
    }
}
