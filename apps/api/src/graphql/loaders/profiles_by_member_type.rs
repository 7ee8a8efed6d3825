//! Profiles-by-MemberType batch loader (`Member.profiles`)

use async_graphql::dataloader::Loader;
use std::collections::HashMap;
use std::sync::Arc;

use super::RelationLoader;
use crate::models::{MemberTypeId, Profile};
use crate::repositories::{EntityRepository, RepositoryError};

/// Batch loader for profiles-by-member-type queries
#[derive(Clone)]
pub struct ProfilesByMemberTypeLoader {
    repository: Arc<dyn EntityRepository>,
}

impl RelationLoader<MemberTypeId> for ProfilesByMemberTypeLoader {
    const NAME: &'static str = "profiles_by_member_type";

    type Record = Profile;

    fn new(repository: Arc<dyn EntityRepository>) -> Self {
        Self { repository }
    }

    fn records(value: Self::Value) -> Vec<Self::Record> {
        value
    }
}

impl Loader<MemberTypeId> for ProfilesByMemberTypeLoader {
    type Value = Vec<Profile>;
    type Error = Arc<RepositoryError>;

    async fn load(
        &self,
        keys: &[MemberTypeId],
    ) -> Result<HashMap<MemberTypeId, Self::Value>, Self::Error> {
        let profiles = self
            .repository
            .profiles_by_member_type_ids(keys)
            .await
            .map_err(Arc::new)?;

        let mut result: HashMap<MemberTypeId, Vec<Profile>> = HashMap::new();
        for profile in profiles {
            result.entry(profile.member_type_id).or_default().push(profile);
        }

        for key in keys {
            result.entry(*key).or_default();
        }

        Ok(result)
    }
}
