//! GraphQL schema builder
//!
//! The schema itself carries no request state. [`ApiSchema::execute`] is the
//! single entry point: it attaches a fresh [`RequestContext`] to every
//! request, so loaders never outlive the request that created them.

use std::sync::Arc;

use async_graphql::{EmptySubscription, Request, Response, Schema};

use crate::config::{GraphQLConfig, DEFAULT_MAX_DEPTH};
use crate::graphql::context::RequestContext;
use crate::graphql::loaders::LoaderSettings;
use crate::repositories::EntityRepository;

use super::mutation::Mutation;
use super::query::Query;

/// The member graph GraphQL schema type
pub type MemberGraphSchema = Schema<Query, Mutation, EmptySubscription>;

/// Builder for constructing the executable schema
pub struct SchemaBuilder {
    repository: Option<Arc<dyn EntityRepository>>,
    max_depth: usize,
    loader_settings: LoaderSettings,
}

impl SchemaBuilder {
    /// Create a new schema builder
    pub fn new() -> Self {
        Self {
            repository: None,
            max_depth: DEFAULT_MAX_DEPTH,
            loader_settings: LoaderSettings::default(),
        }
    }

    /// Set the repository shared by every request
    pub fn repository(mut self, repository: Arc<dyn EntityRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Reject documents nested deeper than `max_depth` during validation
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Batching window for the loaders of every request
    pub fn loader_settings(mut self, settings: LoaderSettings) -> Self {
        self.loader_settings = settings;
        self
    }

    /// Apply depth limit and batching window from configuration
    pub fn config(self, config: &GraphQLConfig) -> Self {
        self.max_depth(config.max_depth)
            .loader_settings(config.loader_settings())
    }

    /// Build the schema, or `None` if no repository was configured
    pub fn build(self) -> Option<ApiSchema> {
        let repository = self.repository?;

        let schema = Schema::build(Query::default(), Mutation::default(), EmptySubscription)
            .limit_depth(self.max_depth)
            .finish();

        Some(ApiSchema {
            schema,
            repository,
            loader_settings: self.loader_settings,
        })
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Executable API: schema plus everything needed to build request contexts
#[derive(Clone)]
pub struct ApiSchema {
    schema: MemberGraphSchema,
    repository: Arc<dyn EntityRepository>,
    loader_settings: LoaderSettings,
}

impl ApiSchema {
    /// Validate and execute one operation with its own request context
    pub async fn execute(&self, request: impl Into<Request>) -> Response {
        let request: Request = request.into();
        let operation = request.operation_name.clone();

        let context = RequestContext::new(Arc::clone(&self.repository), self.loader_settings);
        let response = self.schema.execute(request.data(context)).await;

        tracing::debug!(
            operation = operation.as_deref().unwrap_or("anonymous"),
            errors = response.errors.len(),
            "GraphQL request executed"
        );
        response
    }

    /// Schema definition language of the API
    pub fn sdl(&self) -> String {
        self.schema.sdl()
    }

    /// Repository backing this schema
    pub fn repository(&self) -> &Arc<dyn EntityRepository> {
        &self.repository
    }
}

/// Create a schema over `repository` with default depth limit and batching
pub fn build_schema(repository: Arc<dyn EntityRepository>) -> Option<ApiSchema> {
    SchemaBuilder::new().repository(repository).build()
}
