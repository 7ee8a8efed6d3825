//! Test helper functions for API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use async_graphql::{Request, Variables};
use serde_json::Value;

use member_graph_api::config::{Config, DatabaseConfig, Environment, GraphQLConfig, StorageBackend};
use member_graph_api::graphql::LoaderSettings;
use member_graph_api::{build_schema, ApiSchema, MemoryRepository, SchemaBuilder};

/// Schema over a fresh in-memory repository, with the repository kept
/// around for call accounting
pub struct TestApi {
    pub schema: ApiSchema,
    pub repo: Arc<MemoryRepository>,
}

impl TestApi {
    pub fn new() -> Self {
        let repo = Arc::new(MemoryRepository::new());
        let schema = build_schema(repo.clone()).expect("schema with repository");
        Self { schema, repo }
    }

    /// Like [`TestApi::new`] with explicit batching parameters
    pub fn with_settings(settings: LoaderSettings) -> Self {
        let repo = Arc::new(MemoryRepository::new());
        let schema = SchemaBuilder::new()
            .repository(repo.clone())
            .loader_settings(settings)
            .build()
            .expect("schema with repository");
        Self { schema, repo }
    }

    /// Execute an operation and return the full `{ data, errors }` envelope
    pub async fn execute(&self, query: &str) -> Value {
        let response = self.schema.execute(query).await;
        serde_json::to_value(&response).expect("response serializes")
    }

    /// Execute an operation with variables and return the full envelope
    pub async fn execute_with(&self, query: &str, variables: Value) -> Value {
        let request = Request::new(query).variables(Variables::from_json(variables));
        let response = self.schema.execute(request).await;
        serde_json::to_value(&response).expect("response serializes")
    }

    /// Execute an operation that must succeed and return its `data`
    pub async fn data(&self, query: &str) -> Value {
        let envelope = self.execute(query).await;
        assert_no_errors(&envelope);
        envelope["data"].clone()
    }
}

/// Fail the test if the envelope carries any error
pub fn assert_no_errors(envelope: &Value) {
    if let Some(errors) = envelope.get("errors") {
        assert!(
            errors.as_array().map_or(true, |errors| errors.is_empty()),
            "unexpected errors: {}",
            errors
        );
    }
}

/// Error messages of an envelope
pub fn error_messages(envelope: &Value) -> Vec<String> {
    envelope["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e["message"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Development configuration backed by the in-memory repository
pub fn test_config() -> Config {
    Config {
        environment: Environment::Development,
        port: 0,
        log_level: "debug".to_string(),
        storage: StorageBackend::Memory,
        database: DatabaseConfig::default(),
        graphql: GraphQLConfig::default(),
        cors_allowed_origins: None,
    }
}
