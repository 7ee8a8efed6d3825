//! GraphQL mutations
//!
//! This module contains all mutation resolvers, organized by entity. Each
//! mutation performs a single repository write.

mod post;
mod profile;
mod subscription;
mod user;

pub use post::PostMutation;
pub use profile::ProfileMutation;
pub use subscription::SubscriptionMutation;
pub use user::UserMutation;

use async_graphql::MergedObject;
use uuid::Uuid;

use crate::repositories::RepositoryResult;

/// Root mutation type combining all mutation domains
#[derive(MergedObject, Default)]
pub struct Mutation(UserMutation, ProfileMutation, PostMutation, SubscriptionMutation);

/// Collapse the outcome of a removal into the boolean the schema exposes.
///
/// Callers cannot tell "already absent" from any other failure; the cause
/// is only visible in the logs.
fn removed(entity: &'static str, id: Uuid, result: RepositoryResult<()>) -> bool {
    match result {
        Ok(()) => {
            tracing::info!(entity, %id, "Record removed");
            true
        }
        Err(err) => {
            tracing::debug!(entity, %id, error = %err, "Removal failed");
            false
        }
    }
}
