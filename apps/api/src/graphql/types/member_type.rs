//! Member type GraphQL types
//!
//! Exposed as `Member` with its id drawn from the `MemberTypeId` enum.

use async_graphql::{Context, Enum, Object, Result};

use crate::graphql::loaders::{load_related, ProfilesByMemberTypeLoader, Sibling};
use crate::models::{MemberType as DbMemberType, MemberTypeId as DbMemberTypeId};

use super::profile::Profile;

/// Member type identifier enum for GraphQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
#[graphql(rename_items = "lowercase")]
pub enum MemberTypeId {
    /// Basic membership
    Basic,
    /// Business membership
    Business,
}

impl From<DbMemberTypeId> for MemberTypeId {
    fn from(id: DbMemberTypeId) -> Self {
        match id {
            DbMemberTypeId::Basic => Self::Basic,
            DbMemberTypeId::Business => Self::Business,
        }
    }
}

impl From<MemberTypeId> for DbMemberTypeId {
    fn from(id: MemberTypeId) -> Self {
        match id {
            MemberTypeId::Basic => Self::Basic,
            MemberTypeId::Business => Self::Business,
        }
    }
}

/// Member type exposed via GraphQL
pub struct MemberType {
    inner: Sibling<DbMemberType>,
}

impl MemberType {
    /// Member types fetched together; their relations are batched as one set
    pub fn list(member_types: Vec<DbMemberType>) -> Vec<Self> {
        Sibling::all(member_types).into_iter().map(Self::from).collect()
    }
}

impl From<DbMemberType> for MemberType {
    fn from(member_type: DbMemberType) -> Self {
        Self {
            inner: Sibling::single(member_type),
        }
    }
}

impl From<Sibling<DbMemberType>> for MemberType {
    fn from(member_type: Sibling<DbMemberType>) -> Self {
        Self { inner: member_type }
    }
}

#[Object(name = "Member")]
impl MemberType {
    async fn id(&self) -> MemberTypeId {
        self.inner.id.into()
    }

    /// Discount rate granted to members of this type
    async fn discount(&self) -> f64 {
        self.inner.discount
    }

    /// Maximum number of posts per month
    async fn posts_limit_per_month(&self) -> i32 {
        self.inner.posts_limit_per_month
    }

    /// Profiles holding this membership (batched across its sibling set)
    async fn profiles(&self, ctx: &Context<'_>) -> Result<Option<Vec<Profile>>> {
        let profiles =
            load_related::<_, _, ProfilesByMemberTypeLoader>(ctx, &self.inner, |member_type| {
                member_type.id
            })
            .await?;
        Ok(Some(profiles.into_iter().map(Profile::from).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_type_id_conversions() {
        for id in DbMemberTypeId::ALL {
            let gql: MemberTypeId = id.into();
            assert_eq!(DbMemberTypeId::from(gql), id);
        }
    }
}
