//! Profile queries

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::error::to_graphql_error;
use crate::graphql::context::RequestContext;
use crate::graphql::types::Profile;

#[derive(Default)]
pub struct ProfileQuery;

#[Object]
impl ProfileQuery {
    /// List every profile, ordered by id
    async fn profiles(&self, ctx: &Context<'_>) -> Result<Vec<Profile>> {
        let repo = ctx.data::<RequestContext>()?.repository();
        let profiles = repo.profiles().await.map_err(to_graphql_error)?;
        Ok(Profile::list(profiles))
    }

    /// Get a profile by id
    async fn profile(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Profile>> {
        let repo = ctx.data::<RequestContext>()?.repository();
        let profile = repo.profile(id).await.map_err(to_graphql_error)?;
        Ok(profile.map(Profile::from))
    }
}
