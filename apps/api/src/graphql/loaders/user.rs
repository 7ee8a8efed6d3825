//! User batch loader
//!
//! Batches user id lookups into a single repository call. Serves the to-one
//! references `Profile.user` and `Post.author`.

use async_graphql::dataloader::Loader;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::RelationLoader;
use crate::models::User;
use crate::repositories::{EntityRepository, RepositoryError};

/// Batch loader for user queries
#[derive(Clone)]
pub struct UserLoader {
    repository: Arc<dyn EntityRepository>,
}

impl RelationLoader<Uuid> for UserLoader {
    const NAME: &'static str = "user";

    type Record = User;

    fn new(repository: Arc<dyn EntityRepository>) -> Self {
        Self { repository }
    }

    fn records(value: Self::Value) -> Vec<Self::Record> {
        vec![value]
    }
}

impl Loader<Uuid> for UserLoader {
    type Value = User;
    type Error = Arc<RepositoryError>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let users = self
            .repository
            .users_by_ids(keys)
            .await
            .map_err(Arc::new)?;

        Ok(users.into_iter().map(|u| (u.id, u)).collect())
    }
}
