//! Profile model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::member_type::MemberTypeId;

/// Profile record from the profiles table (one per user)
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Profile {
    /// Unique profile identifier
    pub id: Uuid,

    pub is_male: bool,

    pub year_of_birth: i32,

    /// Owning user, unique across profiles
    pub user_id: Uuid,

    pub member_type_id: MemberTypeId,
}

/// Profile creation input
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProfile {
    pub user_id: Uuid,
    pub is_male: bool,
    pub year_of_birth: i32,
    pub member_type_id: MemberTypeId,
}

/// Partial profile update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeProfile {
    pub is_male: Option<bool>,
    pub year_of_birth: Option<i32>,
}

impl ChangeProfile {
    pub fn apply(&self, profile: &mut Profile) {
        if let Some(is_male) = self.is_male {
            profile.is_male = is_male;
        }
        if let Some(year_of_birth) = self.year_of_birth {
            profile.year_of_birth = year_of_birth;
        }
    }
}
