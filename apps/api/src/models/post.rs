//! Post model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Post record from the posts table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Post {
    /// Unique post identifier
    pub id: Uuid,

    pub title: String,

    pub content: String,

    /// Authoring user
    pub author_id: Uuid,
}

/// Post creation input
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
}

/// Partial post update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangePost {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl ChangePost {
    pub fn apply(&self, post: &mut Post) {
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(content) = &self.content {
            post.content = content.clone();
        }
    }
}
