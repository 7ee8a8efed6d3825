//! User mutations
//!
//! - createUser: Create a user
//! - changeUser: Update name and/or balance
//! - deleteUser: Delete a user with its profile, posts and subscriptions

use async_graphql::{Context, InputObject, Object, Result};
use uuid::Uuid;

use crate::error::to_graphql_error;
use crate::graphql::context::RequestContext;
use crate::graphql::types::User;
use crate::models::{ChangeUser, CreateUser};

use super::removed;

/// Input for creating a user
#[derive(Debug, InputObject)]
pub struct CreateUserInput {
    pub name: String,
    pub balance: f64,
}

impl From<CreateUserInput> for CreateUser {
    fn from(input: CreateUserInput) -> Self {
        Self {
            name: input.name,
            balance: input.balance,
        }
    }
}

/// Input for updating a user; omitted fields are left unchanged
#[derive(Debug, InputObject)]
pub struct ChangeUserInput {
    pub name: Option<String>,
    pub balance: Option<f64>,
}

impl From<ChangeUserInput> for ChangeUser {
    fn from(input: ChangeUserInput) -> Self {
        Self {
            name: input.name,
            balance: input.balance,
        }
    }
}

/// User mutations
#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    /// Create a new user
    async fn create_user(&self, ctx: &Context<'_>, dto: CreateUserInput) -> Result<User> {
        let repo = ctx.data::<RequestContext>()?.repository();
        let user = repo.create_user(dto.into()).await.map_err(to_graphql_error)?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(User::from(user))
    }

    /// Update an existing user
    ///
    /// # Errors
    /// - Returns error if the user does not exist
    async fn change_user(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        dto: ChangeUserInput,
    ) -> Result<User> {
        let repo = ctx.data::<RequestContext>()?.repository();
        let user = repo
            .update_user(id, dto.into())
            .await
            .map_err(to_graphql_error)?;
        Ok(User::from(user))
    }

    /// Delete a user; returns false if nothing was deleted or no id was given
    async fn delete_user(&self, ctx: &Context<'_>, id: Option<Uuid>) -> Result<bool> {
        let Some(id) = id else {
            return Ok(false);
        };
        let repo = ctx.data::<RequestContext>()?.repository();
        Ok(removed("user", id, repo.delete_user(id).await))
    }
}
