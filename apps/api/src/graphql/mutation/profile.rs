//! Profile mutations
//!
//! - createProfile: Create the profile of a user (one per user)
//! - changeProfile: Update isMale and/or yearOfBirth
//! - deleteProfile: Delete a profile

use async_graphql::{Context, InputObject, Object, Result};
use uuid::Uuid;

use crate::error::to_graphql_error;
use crate::graphql::context::RequestContext;
use crate::graphql::types::{MemberTypeId, Profile};
use crate::models::{ChangeProfile, CreateProfile};

use super::removed;

/// Input for creating a profile
#[derive(Debug, InputObject)]
pub struct CreateProfileInput {
    pub user_id: Uuid,
    pub is_male: bool,
    pub year_of_birth: i32,
    pub member_type_id: MemberTypeId,
}

impl From<CreateProfileInput> for CreateProfile {
    fn from(input: CreateProfileInput) -> Self {
        Self {
            user_id: input.user_id,
            is_male: input.is_male,
            year_of_birth: input.year_of_birth,
            member_type_id: input.member_type_id.into(),
        }
    }
}

/// Input for updating a profile; omitted fields are left unchanged
#[derive(Debug, InputObject)]
pub struct ChangeProfileInput {
    pub is_male: Option<bool>,
    pub year_of_birth: Option<i32>,
}

impl From<ChangeProfileInput> for ChangeProfile {
    fn from(input: ChangeProfileInput) -> Self {
        Self {
            is_male: input.is_male,
            year_of_birth: input.year_of_birth,
        }
    }
}

/// Profile mutations
#[derive(Default)]
pub struct ProfileMutation;

#[Object]
impl ProfileMutation {
    /// Create a profile for an existing user
    ///
    /// # Errors
    /// - Returns error if the user does not exist
    /// - Returns error if the user already has a profile
    async fn create_profile(
        &self,
        ctx: &Context<'_>,
        dto: CreateProfileInput,
    ) -> Result<Profile> {
        let repo = ctx.data::<RequestContext>()?.repository();
        let profile = repo
            .create_profile(dto.into())
            .await
            .map_err(to_graphql_error)?;

        tracing::info!(profile_id = %profile.id, user_id = %profile.user_id, "Profile created");
        Ok(Profile::from(profile))
    }

    /// Update an existing profile
    async fn change_profile(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        dto: ChangeProfileInput,
    ) -> Result<Profile> {
        let repo = ctx.data::<RequestContext>()?.repository();
        let profile = repo
            .update_profile(id, dto.into())
            .await
            .map_err(to_graphql_error)?;
        Ok(Profile::from(profile))
    }

    /// Delete a profile; returns false if nothing was deleted or no id was given
    async fn delete_profile(&self, ctx: &Context<'_>, id: Option<Uuid>) -> Result<bool> {
        let Some(id) = id else {
            return Ok(false);
        };
        let repo = ctx.data::<RequestContext>()?.repository();
        Ok(removed("profile", id, repo.delete_profile(id).await))
    }
}
