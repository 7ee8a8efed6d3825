//! User queries
//!
//! - users: List every user
//! - user: Get a user by id

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::error::to_graphql_error;
use crate::graphql::context::RequestContext;
use crate::graphql::types::User;

/// User-related queries
#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// List every user, ordered by id
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let repo = ctx.data::<RequestContext>()?.repository();
        let users = repo.users().await.map_err(to_graphql_error)?;
        Ok(User::list(users))
    }

    /// Get a user by id
    ///
    /// Returns null when no user has this id.
    async fn user(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<User>> {
        let repo = ctx.data::<RequestContext>()?.repository();
        let user = repo.user(id).await.map_err(to_graphql_error)?;
        Ok(user.map(User::from))
    }
}
