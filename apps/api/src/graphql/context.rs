//! Per-request execution context
//!
//! A fresh [`RequestContext`] is attached to every GraphQL request. It owns
//! the loader registry for that request and hands out the shared repository
//! handle; dropping the request drops every loader it created.

use std::sync::Arc;

use async_graphql::parser::types::Field;
use async_graphql::{Context, Positioned};

use crate::graphql::loaders::{LoaderRegistry, LoaderSettings};
use crate::repositories::EntityRepository;

/// Identity of a field node in the executing query document.
///
/// The executable document outlives every resolver of the request, so the
/// address of a field node is stable and unique for the request's duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Node of the field the resolver behind `ctx` is resolving
    pub fn of(ctx: &Context<'_>) -> Self {
        Self(ctx.item as *const Positioned<Field> as usize)
    }

    #[cfg(test)]
    pub(crate) fn from_raw(raw: usize) -> Self {
        Self(raw)
    }
}

/// Request-scoped data: repository handle plus loader registry
pub struct RequestContext {
    repository: Arc<dyn EntityRepository>,
    loaders: LoaderRegistry,
}

impl RequestContext {
    pub fn new(repository: Arc<dyn EntityRepository>, settings: LoaderSettings) -> Self {
        Self {
            loaders: LoaderRegistry::new(Arc::clone(&repository), settings),
            repository,
        }
    }

    /// Repository used by root fields and mutations
    pub fn repository(&self) -> &dyn EntityRepository {
        self.repository.as_ref()
    }

    pub fn loaders(&self) -> &LoaderRegistry {
        &self.loaders
    }
}
