//! Profile-by-User batch loader
//!
//! Each user owns at most one profile, so this is a to-one loader keyed by
//! the owning user's id.

use async_graphql::dataloader::Loader;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::RelationLoader;
use crate::models::Profile;
use crate::repositories::{EntityRepository, RepositoryError};

/// Batch loader for profile-by-user queries
#[derive(Clone)]
pub struct ProfileByUserLoader {
    repository: Arc<dyn EntityRepository>,
}

impl RelationLoader<Uuid> for ProfileByUserLoader {
    const NAME: &'static str = "profile_by_user";

    type Record = Profile;

    fn new(repository: Arc<dyn EntityRepository>) -> Self {
        Self { repository }
    }

    fn records(value: Self::Value) -> Vec<Self::Record> {
        vec![value]
    }
}

impl Loader<Uuid> for ProfileByUserLoader {
    type Value = Profile;
    type Error = Arc<RepositoryError>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let profiles = self
            .repository
            .profiles_by_user_ids(keys)
            .await
            .map_err(Arc::new)?;

        Ok(profiles.into_iter().map(|p| (p.user_id, p)).collect())
    }
}
