//! GraphQL schema and resolvers
//!
//! This module contains the async-graphql schema including:
//! - Query resolvers for list and single-record reads
//! - Mutation resolvers for creates, updates, deletes and subscriptions
//! - Type definitions with batched relation resolvers
//! - The request context and its loader registry

pub mod context;
pub mod loaders;
pub mod mutation;
pub mod query;
pub mod schema;
pub mod types;

pub use context::{NodeId, RequestContext};
pub use loaders::{LoaderRegistry, LoaderSettings};
pub use schema::{build_schema, ApiSchema, MemberGraphSchema, SchemaBuilder};
