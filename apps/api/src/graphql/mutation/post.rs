//! Post mutations
//!
//! - createPost: Create a post for an existing author
//! - changePost: Update title and/or content
//! - deletePost: Delete a post

use async_graphql::{Context, InputObject, Object, Result};
use uuid::Uuid;

use crate::error::to_graphql_error;
use crate::graphql::context::RequestContext;
use crate::graphql::types::Post;
use crate::models::{ChangePost, CreatePost};

use super::removed;

/// Input for creating a post
#[derive(Debug, InputObject)]
pub struct CreatePostInput {
    pub title: String,
    pub author_id: Uuid,
    pub content: String,
}

impl From<CreatePostInput> for CreatePost {
    fn from(input: CreatePostInput) -> Self {
        Self {
            title: input.title,
            content: input.content,
            author_id: input.author_id,
        }
    }
}

/// Input for updating a post; omitted fields are left unchanged
#[derive(Debug, InputObject)]
pub struct ChangePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl From<ChangePostInput> for ChangePost {
    fn from(input: ChangePostInput) -> Self {
        Self {
            title: input.title,
            content: input.content,
        }
    }
}

/// Post mutations
#[derive(Default)]
pub struct PostMutation;

#[Object]
impl PostMutation {
    /// Create a new post
    ///
    /// # Errors
    /// - Returns error if the author does not exist
    async fn create_post(&self, ctx: &Context<'_>, dto: CreatePostInput) -> Result<Post> {
        let repo = ctx.data::<RequestContext>()?.repository();
        let post = repo.create_post(dto.into()).await.map_err(to_graphql_error)?;

        tracing::info!(post_id = %post.id, author_id = %post.author_id, "Post created");
        Ok(Post::from(post))
    }

    /// Update an existing post
    async fn change_post(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        dto: ChangePostInput,
    ) -> Result<Post> {
        let repo = ctx.data::<RequestContext>()?.repository();
        let post = repo
            .update_post(id, dto.into())
            .await
            .map_err(to_graphql_error)?;
        Ok(Post::from(post))
    }

    /// Delete a post; returns false if nothing was deleted or no id was given
    async fn delete_post(&self, ctx: &Context<'_>, id: Option<Uuid>) -> Result<bool> {
        let Some(id) = id else {
            return Ok(false);
        };
        let repo = ctx.data::<RequestContext>()?.repository();
        Ok(removed("post", id, repo.delete_post(id).await))
    }
}
