//! Posts-by-Author batch loader
//!
//! This loader batches multiple author ID lookups into a single repository
//! call, returning all posts for each author (`User.posts`).

use async_graphql::dataloader::Loader;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::RelationLoader;
use crate::models::Post;
use crate::repositories::{EntityRepository, RepositoryError};

/// Batch loader for posts-by-author queries
#[derive(Clone)]
pub struct PostsByAuthorLoader {
    repository: Arc<dyn EntityRepository>,
}

impl RelationLoader<Uuid> for PostsByAuthorLoader {
    const NAME: &'static str = "posts_by_author";

    type Record = Post;

    fn new(repository: Arc<dyn EntityRepository>) -> Self {
        Self { repository }
    }

    fn records(value: Self::Value) -> Vec<Self::Record> {
        value
    }
}

impl Loader<Uuid> for PostsByAuthorLoader {
    type Value = Vec<Post>;
    type Error = Arc<RepositoryError>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let posts = self
            .repository
            .posts_by_author_ids(keys)
            .await
            .map_err(Arc::new)?;

        // Group posts by author_id
        let mut result: HashMap<Uuid, Vec<Post>> = HashMap::new();
        for post in posts {
            result.entry(post.author_id).or_default().push(post);
        }

        // Ensure all requested keys have an entry (even if empty)
        for key in keys {
            result.entry(*key).or_default();
        }

        Ok(result)
    }
}
