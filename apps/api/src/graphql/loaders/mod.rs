//! Batched relation loading for GraphQL
//!
//! This module provides the batch functions behind every relationship
//! resolver, solving the N+1 query problem. Each loader turns a set of
//! parent keys into a single repository call.
//!
//! There are two types of loaders:
//! - Single-entity loaders: at most one record per key
//! - Collection loaders: any number of related records per key
//!
//! Loaders are never shared through schema data. Each request owns a
//! [`LoaderRegistry`] and resolvers reach their batch through
//! [`load_related`], which scopes it to the field node being resolved and
//! the sibling set of the parent.

mod authors_by_subscriber;
mod member_type;
mod posts_by_author;
mod profile_by_user;
mod profiles_by_member_type;
mod registry;
mod siblings;
mod subscribers_by_author;
mod user;

pub use authors_by_subscriber::AuthorsBySubscriberLoader;
pub use member_type::MemberTypeLoader;
pub use posts_by_author::PostsByAuthorLoader;
pub use profile_by_user::ProfileByUserLoader;
pub use profiles_by_member_type::ProfilesByMemberTypeLoader;
pub use registry::{
    Batch, BatchCell, BatchKey, BatchResult, LoaderRegistry, LoaderSettings, RelationLoader,
};
pub use siblings::{Sibling, SiblingSet, SiblingSetId};
pub use subscribers_by_author::SubscribersByAuthorLoader;
pub use user::UserLoader;

use std::hash::Hash;
use std::sync::Arc;

use async_graphql::{Context, Result};

use crate::error::to_graphql_error;
use crate::graphql::context::{NodeId, RequestContext};

/// Load the relation `L` for `parent`.
///
/// The first sibling to get here fetches the relation for the keys of the
/// whole sibling set, as extracted by `key_of`; all other siblings wait for
/// that fetch and pick their own records out of it. A failed fetch is
/// reported to every sibling.
pub async fn load_related<T, K, L>(
    ctx: &Context<'_>,
    parent: &Sibling<T>,
    key_of: impl Fn(&T) -> K + Send + Sync,
) -> Result<Vec<Sibling<L::Record>>>
where
    T: Send + Sync,
    K: Send + Sync + Hash + Eq + Clone + 'static,
    L: RelationLoader<K>,
{
    let request = ctx.data::<RequestContext>()?;
    let registry = request.loaders();
    let siblings = parent.siblings();

    let cell = registry
        .get_or_create::<K, L>(BatchKey::new(NodeId::of(ctx), siblings.id()))
        .map_err(to_graphql_error)?;
    let batch = cell
        .get_or_init(|| {
            let keys = siblings.records().iter().map(&key_of).collect();
            registry.fetch::<K, L>(keys)
        })
        .await;

    match batch {
        Ok(batch) => Ok(batch.get(&key_of(&**parent))),
        Err(err) => Err(to_graphql_error(Arc::clone(err))),
    }
}
