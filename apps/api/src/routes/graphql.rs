//! GraphQL HTTP endpoints
//!
//! - `POST /graphql` - Execute an operation
//! - `GET /graphql` - GraphQL Playground (when enabled)

use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::post,
    Router,
};

use crate::graphql::ApiSchema;

/// Create the GraphQL router
pub fn graphql_router(schema: ApiSchema, playground: bool) -> Router {
    let mut endpoint = post(graphql_handler);
    if playground {
        endpoint = endpoint.get(graphql_playground);
    }
    Router::new().route("/graphql", endpoint).with_state(schema)
}

/// GraphQL handler that executes operations against the schema
///
/// Every request gets a fresh request context (and with it fresh loaders)
/// inside [`ApiSchema::execute`].
async fn graphql_handler(State(schema): State<ApiSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

/// GraphQL Playground handler
async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}
