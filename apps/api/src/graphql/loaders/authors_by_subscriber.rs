//! Authors-by-Subscriber batch loader
//!
//! Resolves `User.userSubscribedTo`: for each subscriber id, the users that
//! subscriber follows.

use async_graphql::dataloader::Loader;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::RelationLoader;
use crate::models::User;
use crate::repositories::{EntityRepository, RepositoryError};

/// Batch loader for subscribed-to queries
#[derive(Clone)]
pub struct AuthorsBySubscriberLoader {
    repository: Arc<dyn EntityRepository>,
}

impl RelationLoader<Uuid> for AuthorsBySubscriberLoader {
    const NAME: &'static str = "authors_by_subscriber";

    type Record = User;

    fn new(repository: Arc<dyn EntityRepository>) -> Self {
        Self { repository }
    }

    fn records(value: Self::Value) -> Vec<Self::Record> {
        value
    }
}

impl Loader<Uuid> for AuthorsBySubscriberLoader {
    type Value = Vec<User>;
    type Error = Arc<RepositoryError>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let authors = self
            .repository
            .authors_by_subscriber_ids(keys)
            .await
            .map_err(Arc::new)?;

        // Group authors by the subscriber that follows them
        let mut result: HashMap<Uuid, Vec<User>> = HashMap::new();
        for linked in authors {
            result.entry(linked.link_id).or_default().push(linked.user);
        }

        for key in keys {
            result.entry(*key).or_default();
        }

        Ok(result)
    }
}
