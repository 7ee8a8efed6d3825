//! Profile GraphQL type

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::loaders::{load_related, MemberTypeLoader, Sibling, UserLoader};
use crate::models::Profile as DbProfile;

use super::member_type::{MemberType, MemberTypeId};
use super::user::User;

/// Profile exposed via GraphQL
pub struct Profile {
    inner: Sibling<DbProfile>,
}

impl Profile {
    /// Profiles fetched together; their relations are batched as one set
    pub fn list(profiles: Vec<DbProfile>) -> Vec<Self> {
        Sibling::all(profiles).into_iter().map(Self::from).collect()
    }
}

impl From<DbProfile> for Profile {
    fn from(profile: DbProfile) -> Self {
        Self {
            inner: Sibling::single(profile),
        }
    }
}

impl From<Sibling<DbProfile>> for Profile {
    fn from(profile: Sibling<DbProfile>) -> Self {
        Self { inner: profile }
    }
}

#[Object]
impl Profile {
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    async fn is_male(&self) -> bool {
        self.inner.is_male
    }

    async fn year_of_birth(&self) -> i32 {
        self.inner.year_of_birth
    }

    /// Owning user id
    async fn user_id(&self) -> Uuid {
        self.inner.user_id
    }

    async fn member_type_id(&self) -> MemberTypeId {
        self.inner.member_type_id.into()
    }

    // Relationship resolvers

    /// Owning user (batched across its sibling set)
    async fn user(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        let user =
            load_related::<_, _, UserLoader>(ctx, &self.inner, |profile| profile.user_id).await?;
        Ok(user.into_iter().next().map(User::from))
    }

    /// Membership of this profile (batched across its sibling set)
    async fn member_type(&self, ctx: &Context<'_>) -> Result<Option<MemberType>> {
        let member_type = load_related::<_, _, MemberTypeLoader>(ctx, &self.inner, |profile| {
            profile.member_type_id
        })
        .await?;
        Ok(member_type.into_iter().next().map(MemberType::from))
    }
}
