//! Post GraphQL type

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::loaders::{load_related, Sibling, UserLoader};
use crate::models::Post as DbPost;

use super::user::User;

/// Post exposed via GraphQL
pub struct Post {
    inner: Sibling<DbPost>,
}

impl Post {
    /// Posts fetched together; their relations are batched as one set
    pub fn list(posts: Vec<DbPost>) -> Vec<Self> {
        Sibling::all(posts).into_iter().map(Self::from).collect()
    }
}

impl From<DbPost> for Post {
    fn from(post: DbPost) -> Self {
        Self {
            inner: Sibling::single(post),
        }
    }
}

impl From<Sibling<DbPost>> for Post {
    fn from(post: Sibling<DbPost>) -> Self {
        Self { inner: post }
    }
}

#[Object]
impl Post {
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    async fn title(&self) -> &str {
        &self.inner.title
    }

    async fn content(&self) -> &str {
        &self.inner.content
    }

    async fn author_id(&self) -> Uuid {
        self.inner.author_id
    }

    /// Author of the post (batched across its sibling set)
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let author =
            load_related::<_, _, UserLoader>(ctx, &self.inner, |post| post.author_id).await?;
        Ok(author.into_iter().next().map(User::from))
    }
}
