//! Post queries

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::error::to_graphql_error;
use crate::graphql::context::RequestContext;
use crate::graphql::types::Post;

#[derive(Default)]
pub struct PostQuery;

#[Object]
impl PostQuery {
    /// List every post, ordered by id
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let repo = ctx.data::<RequestContext>()?.repository();
        let posts = repo.posts().await.map_err(to_graphql_error)?;
        Ok(Post::list(posts))
    }

    /// Get a post by id
    async fn post(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Post>> {
        let repo = ctx.data::<RequestContext>()?.repository();
        let post = repo.post(id).await.map_err(to_graphql_error)?;
        Ok(post.map(Post::from))
    }
}
