//! Member type queries
//!
//! - memberTypes: List every member type
//! - memberType: Get a member type by id

use async_graphql::{Context, Object, Result};

use crate::error::to_graphql_error;
use crate::graphql::context::RequestContext;
use crate::graphql::types::{MemberType, MemberTypeId};

/// Member type queries
#[derive(Default)]
pub struct MemberTypeQuery;

#[Object]
impl MemberTypeQuery {
    /// List every member type
    async fn member_types(&self, ctx: &Context<'_>) -> Result<Vec<MemberType>> {
        let repo = ctx.data::<RequestContext>()?.repository();
        let member_types = repo.member_types().await.map_err(to_graphql_error)?;
        Ok(MemberType::list(member_types))
    }

    /// Get a member type by id
    async fn member_type(&self, ctx: &Context<'_>, id: MemberTypeId) -> Result<Option<MemberType>> {
        let repo = ctx.data::<RequestContext>()?.repository();
        let member_type = repo
            .member_type(id.into())
            .await
            .map_err(to_graphql_error)?;
        Ok(member_type.map(MemberType::from))
    }
}
