//! Subscription-edge mutations
//!
//! - subscribeTo: Make a user follow an author
//! - unsubscribeFrom: Remove that edge again
//!
//! Neither self-subscription nor an already existing edge is checked here;
//! a repeated edge is rejected by the storage layer as a conflict.

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::error::to_graphql_error;
use crate::graphql::context::RequestContext;
use crate::graphql::types::User;

/// Subscription mutations
#[derive(Default)]
pub struct SubscriptionMutation;

#[Object]
impl SubscriptionMutation {
    /// Subscribe `userId` to `authorId`, returning the subscriber
    async fn subscribe_to(
        &self,
        ctx: &Context<'_>,
        user_id: Uuid,
        author_id: Uuid,
    ) -> Result<User> {
        let repo = ctx.data::<RequestContext>()?.repository();
        let subscriber = repo
            .subscribe(user_id, author_id)
            .await
            .map_err(to_graphql_error)?;

        tracing::info!(subscriber_id = %user_id, author_id = %author_id, "Subscription added");
        Ok(User::from(subscriber))
    }

    /// Remove the subscription of `userId` to `authorId`; false if there was none
    async fn unsubscribe_from(
        &self,
        ctx: &Context<'_>,
        user_id: Uuid,
        author_id: Uuid,
    ) -> Result<bool> {
        let repo = ctx.data::<RequestContext>()?.repository();
        let result = repo.unsubscribe(user_id, author_id).await;
        if let Err(err) = &result {
            tracing::debug!(subscriber_id = %user_id, author_id = %author_id, error = %err, "Unsubscribe failed");
            return Ok(false);
        }

        tracing::info!(subscriber_id = %user_id, author_id = %author_id, "Subscription removed");
        Ok(true)
    }
}
