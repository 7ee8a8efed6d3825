//! User GraphQL type
//!
//! This module defines the GraphQL type for users with relationship
//! resolvers for profile, posts and both directions of the subscription
//! relation.

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::loaders::{
    load_related, AuthorsBySubscriberLoader, PostsByAuthorLoader, ProfileByUserLoader, Sibling,
    SubscribersByAuthorLoader,
};
use crate::models::User as DbUser;

use super::post::Post;
use super::profile::Profile;

/// User information exposed via GraphQL
pub struct User {
    inner: Sibling<DbUser>,
}

impl User {
    /// Users fetched together; their relations are batched as one set
    pub fn list(users: Vec<DbUser>) -> Vec<Self> {
        Sibling::all(users).into_iter().map(Self::from).collect()
    }
}

impl From<DbUser> for User {
    fn from(user: DbUser) -> Self {
        Self {
            inner: Sibling::single(user),
        }
    }
}

impl From<Sibling<DbUser>> for User {
    fn from(user: Sibling<DbUser>) -> Self {
        Self { inner: user }
    }
}

fn users(users: Vec<Sibling<DbUser>>) -> Option<Vec<User>> {
    Some(users.into_iter().map(User::from).collect())
}

#[Object]
impl User {
    /// Unique user identifier
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    async fn name(&self) -> &str {
        &self.inner.name
    }

    /// Account balance as a decimal string
    async fn balance(&self) -> String {
        self.inner.balance_string()
    }

    // Relationship resolvers

    /// The user's profile, if one was created
    async fn profile(&self, ctx: &Context<'_>) -> Result<Option<Profile>> {
        let profile =
            load_related::<_, _, ProfileByUserLoader>(ctx, &self.inner, |user| user.id).await?;
        Ok(profile.into_iter().next().map(Profile::from))
    }

    /// Posts written by this user
    async fn posts(&self, ctx: &Context<'_>) -> Result<Option<Vec<Post>>> {
        let posts =
            load_related::<_, _, PostsByAuthorLoader>(ctx, &self.inner, |user| user.id).await?;
        Ok(Some(posts.into_iter().map(Post::from).collect()))
    }

    /// Users this user is subscribed to
    async fn user_subscribed_to(&self, ctx: &Context<'_>) -> Result<Option<Vec<User>>> {
        let authors =
            load_related::<_, _, AuthorsBySubscriberLoader>(ctx, &self.inner, |user| user.id)
                .await?;
        Ok(users(authors))
    }

    /// Users subscribed to this user
    async fn subscribed_to_user(&self, ctx: &Context<'_>) -> Result<Option<Vec<User>>> {
        let subscribers =
            load_related::<_, _, SubscribersByAuthorLoader>(ctx, &self.inner, |user| user.id)
                .await?;
        Ok(users(subscribers))
    }
}
