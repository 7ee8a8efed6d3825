//! Subscribers-by-Author batch loader
//!
//! Resolves `User.subscribedToUser`: for each author id, the users
//! subscribed to that author.

use async_graphql::dataloader::Loader;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::RelationLoader;
use crate::models::User;
use crate::repositories::{EntityRepository, RepositoryError};

/// Batch loader for subscriber queries
#[derive(Clone)]
pub struct SubscribersByAuthorLoader {
    repository: Arc<dyn EntityRepository>,
}

impl RelationLoader<Uuid> for SubscribersByAuthorLoader {
    const NAME: &'static str = "subscribers_by_author";

    type Record = User;

    fn new(repository: Arc<dyn EntityRepository>) -> Self {
        Self { repository }
    }

    fn records(value: Self::Value) -> Vec<Self::Record> {
        value
    }
}

impl Loader<Uuid> for SubscribersByAuthorLoader {
    type Value = Vec<User>;
    type Error = Arc<RepositoryError>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let subscribers = self
            .repository
            .subscribers_by_author_ids(keys)
            .await
            .map_err(Arc::new)?;

        let mut result: HashMap<Uuid, Vec<User>> = HashMap::new();
        for linked in subscribers {
            result.entry(linked.link_id).or_default().push(linked.user);
        }

        for key in keys {
            result.entry(*key).or_default();
        }

        Ok(result)
    }
}
