//! Entity repository layer
//!
//! All data access goes through [`EntityRepository`]. Resolvers at the query
//! root call the single-record and whole-collection methods directly; the
//! batched `*_by_*` methods exist for the relation loaders and always take a
//! full key set so one call answers many parents.
//!
//! Two backends implement the trait:
//! - [`PgRepository`]: PostgreSQL through a shared `sqlx` pool
//! - [`MemoryRepository`]: process-local store used by tests and
//!   database-less development

pub mod memory;
pub mod postgres;
pub mod utils;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    ChangePost, ChangeProfile, ChangeUser, CreatePost, CreateProfile, CreateUser, LinkedUser,
    MemberType, MemberTypeId, Post, Profile, User,
};

/// Errors raised by repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// The addressed record does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A uniqueness constraint rejected the write
    #[error("{entity} already exists: {detail}")]
    Conflict { entity: &'static str, detail: String },

    /// The write points at a record that does not exist
    #[error("{entity} references a missing record: {detail}")]
    InvalidReference { entity: &'static str, detail: String },

    /// Underlying database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The backend cannot serve requests right now
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Whether this error means the addressed record was absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
            || matches!(self, Self::Database(sqlx::Error::RowNotFound))
    }
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Data access interface for every entity collection
#[async_trait]
pub trait EntityRepository: Send + Sync + 'static {
    /// Short backend name for logs and health output
    fn backend(&self) -> &'static str;

    /// Verify the backend can serve queries
    async fn ping(&self) -> RepositoryResult<()>;

    // ==================== Member types ====================

    async fn member_types(&self) -> RepositoryResult<Vec<MemberType>>;

    async fn member_type(&self, id: MemberTypeId) -> RepositoryResult<Option<MemberType>>;

    async fn member_types_by_ids(&self, ids: &[MemberTypeId]) -> RepositoryResult<Vec<MemberType>>;

    // ==================== Users ====================

    async fn users(&self) -> RepositoryResult<Vec<User>>;

    async fn user(&self, id: Uuid) -> RepositoryResult<Option<User>>;

    async fn users_by_ids(&self, ids: &[Uuid]) -> RepositoryResult<Vec<User>>;

    async fn create_user(&self, input: CreateUser) -> RepositoryResult<User>;

    async fn update_user(&self, id: Uuid, input: ChangeUser) -> RepositoryResult<User>;

    /// Delete a user together with its profile, posts and subscription edges
    async fn delete_user(&self, id: Uuid) -> RepositoryResult<()>;

    // ==================== Profiles ====================

    async fn profiles(&self) -> RepositoryResult<Vec<Profile>>;

    async fn profile(&self, id: Uuid) -> RepositoryResult<Option<Profile>>;

    async fn profiles_by_user_ids(&self, user_ids: &[Uuid]) -> RepositoryResult<Vec<Profile>>;

    async fn profiles_by_member_type_ids(
        &self,
        member_type_ids: &[MemberTypeId],
    ) -> RepositoryResult<Vec<Profile>>;

    async fn create_profile(&self, input: CreateProfile) -> RepositoryResult<Profile>;

    async fn update_profile(&self, id: Uuid, input: ChangeProfile) -> RepositoryResult<Profile>;

    async fn delete_profile(&self, id: Uuid) -> RepositoryResult<()>;

    // ==================== Posts ====================

    async fn posts(&self) -> RepositoryResult<Vec<Post>>;

    async fn post(&self, id: Uuid) -> RepositoryResult<Option<Post>>;

    async fn posts_by_author_ids(&self, author_ids: &[Uuid]) -> RepositoryResult<Vec<Post>>;

    async fn create_post(&self, input: CreatePost) -> RepositoryResult<Post>;

    async fn update_post(&self, id: Uuid, input: ChangePost) -> RepositoryResult<Post>;

    async fn delete_post(&self, id: Uuid) -> RepositoryResult<()>;

    // ==================== Subscriptions ====================

    /// Authors followed by any of `subscriber_ids`; `link_id` is the subscriber
    async fn authors_by_subscriber_ids(
        &self,
        subscriber_ids: &[Uuid],
    ) -> RepositoryResult<Vec<LinkedUser>>;

    /// Subscribers of any of `author_ids`; `link_id` is the author
    async fn subscribers_by_author_ids(
        &self,
        author_ids: &[Uuid],
    ) -> RepositoryResult<Vec<LinkedUser>>;

    /// Record that `subscriber_id` follows `author_id`, returning the subscriber
    async fn subscribe(&self, subscriber_id: Uuid, author_id: Uuid) -> RepositoryResult<User>;

    async fn unsubscribe(&self, subscriber_id: Uuid, author_id: Uuid) -> RepositoryResult<()>;
}
