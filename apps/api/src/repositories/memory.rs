//! In-memory repository
//!
//! Mirrors the relational behaviour of the PostgreSQL schema (unique profile
//! per user, cascading user deletes, composite-unique subscription edges)
//! without a database. Every trait call is counted per operation name, and
//! individual operations can be switched to fail, which is what the batching
//! tests rely on.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{EntityRepository, RepositoryError, RepositoryResult};
use crate::models::{
    ChangePost, ChangeProfile, ChangeUser, CreatePost, CreateProfile, CreateUser, LinkedUser,
    MemberType, MemberTypeId, Post, Profile, User,
};

#[derive(Default)]
struct MemoryState {
    member_types: BTreeMap<MemberTypeId, MemberType>,
    users: BTreeMap<Uuid, User>,
    profiles: BTreeMap<Uuid, Profile>,
    posts: BTreeMap<Uuid, Post>,
    /// (subscriber_id, author_id)
    subscriptions: BTreeSet<(Uuid, Uuid)>,
}

/// Process-local repository with call accounting
pub struct MemoryRepository {
    state: RwLock<MemoryState>,
    calls: DashMap<&'static str, usize>,
    failing: DashSet<&'static str>,
}

impl MemoryRepository {
    /// Create an empty store seeded with the member type reference data
    pub fn new() -> Self {
        let state = MemoryState {
            member_types: MemberType::seed().into_iter().map(|m| (m.id, m)).collect(),
            ..MemoryState::default()
        };

        Self {
            state: RwLock::new(state),
            calls: DashMap::new(),
            failing: DashSet::new(),
        }
    }

    /// Number of times `operation` (a trait method name) was called
    pub fn call_count(&self, operation: &str) -> usize {
        self.calls.get(operation).map(|count| *count).unwrap_or(0)
    }

    /// Total number of trait calls across all operations
    pub fn total_calls(&self) -> usize {
        self.calls.iter().map(|entry| *entry.value()).sum()
    }

    /// Forget all recorded calls
    pub fn reset_calls(&self) {
        self.calls.clear();
    }

    /// Make every subsequent call to `operation` fail with `Unavailable`
    pub fn fail_operation(&self, operation: &'static str) {
        self.failing.insert(operation);
    }

    /// Undo [`fail_operation`](Self::fail_operation)
    pub fn restore_operation(&self, operation: &'static str) {
        self.failing.remove(operation);
    }

    fn record(&self, operation: &'static str) -> RepositoryResult<()> {
        *self.calls.entry(operation).or_insert(0) += 1;

        if self.failing.contains(operation) {
            tracing::debug!(operation, "Injected repository failure");
            return Err(RepositoryError::Unavailable(format!(
                "{} is failing",
                operation
            )));
        }
        Ok(())
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn linked(state: &MemoryState, link_id: Uuid, user_id: Uuid) -> Option<LinkedUser> {
    state.users.get(&user_id).map(|user| LinkedUser {
        link_id,
        user: user.clone(),
    })
}

fn sort_by_user_id(mut users: Vec<LinkedUser>) -> Vec<LinkedUser> {
    users.sort_by_key(|linked| linked.user.id);
    users
}

#[async_trait]
impl EntityRepository for MemoryRepository {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> RepositoryResult<()> {
        self.record("ping")
    }

    // ==================== Member types ====================

    async fn member_types(&self) -> RepositoryResult<Vec<MemberType>> {
        self.record("member_types")?;
        let state = self.state.read().await;
        Ok(state.member_types.values().cloned().collect())
    }

    async fn member_type(&self, id: MemberTypeId) -> RepositoryResult<Option<MemberType>> {
        self.record("member_type")?;
        let state = self.state.read().await;
        Ok(state.member_types.get(&id).cloned())
    }

    async fn member_types_by_ids(&self, ids: &[MemberTypeId]) -> RepositoryResult<Vec<MemberType>> {
        self.record("member_types_by_ids")?;
        let state = self.state.read().await;
        Ok(state
            .member_types
            .values()
            .filter(|m| ids.contains(&m.id))
            .cloned()
            .collect())
    }

    // ==================== Users ====================

    async fn users(&self) -> RepositoryResult<Vec<User>> {
        self.record("users")?;
        let state = self.state.read().await;
        Ok(state.users.values().cloned().collect())
    }

    async fn user(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        self.record("user")?;
        let state = self.state.read().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn users_by_ids(&self, ids: &[Uuid]) -> RepositoryResult<Vec<User>> {
        self.record("users_by_ids")?;
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn create_user(&self, input: CreateUser) -> RepositoryResult<User> {
        self.record("create_user")?;
        let user = User {
            id: Uuid::new_v4(),
            name: input.name,
            balance: input.balance,
        };

        let mut state = self.state.write().await;
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: Uuid, input: ChangeUser) -> RepositoryResult<User> {
        self.record("update_user")?;
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("user", id))?;
        input.apply(user);
        Ok(user.clone())
    }

    async fn delete_user(&self, id: Uuid) -> RepositoryResult<()> {
        self.record("delete_user")?;
        let mut state = self.state.write().await;
        if state.users.remove(&id).is_none() {
            return Err(RepositoryError::not_found("user", id));
        }

        state.profiles.retain(|_, p| p.user_id != id);
        state.posts.retain(|_, p| p.author_id != id);
        state
            .subscriptions
            .retain(|(subscriber, author)| *subscriber != id && *author != id);
        Ok(())
    }

    // ==================== Profiles ====================

    async fn profiles(&self) -> RepositoryResult<Vec<Profile>> {
        self.record("profiles")?;
        let state = self.state.read().await;
        Ok(state.profiles.values().cloned().collect())
    }

    async fn profile(&self, id: Uuid) -> RepositoryResult<Option<Profile>> {
        self.record("profile")?;
        let state = self.state.read().await;
        Ok(state.profiles.get(&id).cloned())
    }

    async fn profiles_by_user_ids(&self, user_ids: &[Uuid]) -> RepositoryResult<Vec<Profile>> {
        self.record("profiles_by_user_ids")?;
        let state = self.state.read().await;
        Ok(state
            .profiles
            .values()
            .filter(|p| user_ids.contains(&p.user_id))
            .cloned()
            .collect())
    }

    async fn profiles_by_member_type_ids(
        &self,
        member_type_ids: &[MemberTypeId],
    ) -> RepositoryResult<Vec<Profile>> {
        self.record("profiles_by_member_type_ids")?;
        let state = self.state.read().await;
        Ok(state
            .profiles
            .values()
            .filter(|p| member_type_ids.contains(&p.member_type_id))
            .cloned()
            .collect())
    }

    async fn create_profile(&self, input: CreateProfile) -> RepositoryResult<Profile> {
        self.record("create_profile")?;
        let mut state = self.state.write().await;

        if !state.users.contains_key(&input.user_id) {
            return Err(RepositoryError::InvalidReference {
                entity: "profile",
                detail: format!("user {} does not exist", input.user_id),
            });
        }
        if state.profiles.values().any(|p| p.user_id == input.user_id) {
            return Err(RepositoryError::Conflict {
                entity: "profile",
                detail: format!("user {} already has a profile", input.user_id),
            });
        }

        let profile = Profile {
            id: Uuid::new_v4(),
            is_male: input.is_male,
            year_of_birth: input.year_of_birth,
            user_id: input.user_id,
            member_type_id: input.member_type_id,
        };
        state.profiles.insert(profile.id, profile.clone());
        Ok(profile)
    }

    async fn update_profile(&self, id: Uuid, input: ChangeProfile) -> RepositoryResult<Profile> {
        self.record("update_profile")?;
        let mut state = self.state.write().await;
        let profile = state
            .profiles
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("profile", id))?;
        input.apply(profile);
        Ok(profile.clone())
    }

    async fn delete_profile(&self, id: Uuid) -> RepositoryResult<()> {
        self.record("delete_profile")?;
        let mut state = self.state.write().await;
        state
            .profiles
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found("profile", id))
    }

    // ==================== Posts ====================

    async fn posts(&self) -> RepositoryResult<Vec<Post>> {
        self.record("posts")?;
        let state = self.state.read().await;
        Ok(state.posts.values().cloned().collect())
    }

    async fn post(&self, id: Uuid) -> RepositoryResult<Option<Post>> {
        self.record("post")?;
        let state = self.state.read().await;
        Ok(state.posts.get(&id).cloned())
    }

    async fn posts_by_author_ids(&self, author_ids: &[Uuid]) -> RepositoryResult<Vec<Post>> {
        self.record("posts_by_author_ids")?;
        let state = self.state.read().await;
        Ok(state
            .posts
            .values()
            .filter(|p| author_ids.contains(&p.author_id))
            .cloned()
            .collect())
    }

    async fn create_post(&self, input: CreatePost) -> RepositoryResult<Post> {
        self.record("create_post")?;
        let mut state = self.state.write().await;

        if !state.users.contains_key(&input.author_id) {
            return Err(RepositoryError::InvalidReference {
                entity: "post",
                detail: format!("author {} does not exist", input.author_id),
            });
        }

        let post = Post {
            id: Uuid::new_v4(),
            title: input.title,
            content: input.content,
            author_id: input.author_id,
        };
        state.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update_post(&self, id: Uuid, input: ChangePost) -> RepositoryResult<Post> {
        self.record("update_post")?;
        let mut state = self.state.write().await;
        let post = state
            .posts
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("post", id))?;
        input.apply(post);
        Ok(post.clone())
    }

    async fn delete_post(&self, id: Uuid) -> RepositoryResult<()> {
        self.record("delete_post")?;
        let mut state = self.state.write().await;
        state
            .posts
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::not_found("post", id))
    }

    // ==================== Subscriptions ====================

    async fn authors_by_subscriber_ids(
        &self,
        subscriber_ids: &[Uuid],
    ) -> RepositoryResult<Vec<LinkedUser>> {
        self.record("authors_by_subscriber_ids")?;
        let state = self.state.read().await;
        let authors = state
            .subscriptions
            .iter()
            .filter(|(subscriber, _)| subscriber_ids.contains(subscriber))
            .filter_map(|(subscriber, author)| linked(&state, *subscriber, *author))
            .collect();
        Ok(sort_by_user_id(authors))
    }

    async fn subscribers_by_author_ids(
        &self,
        author_ids: &[Uuid],
    ) -> RepositoryResult<Vec<LinkedUser>> {
        self.record("subscribers_by_author_ids")?;
        let state = self.state.read().await;
        let subscribers = state
            .subscriptions
            .iter()
            .filter(|(_, author)| author_ids.contains(author))
            .filter_map(|(subscriber, author)| linked(&state, *author, *subscriber))
            .collect();
        Ok(sort_by_user_id(subscribers))
    }

    async fn subscribe(&self, subscriber_id: Uuid, author_id: Uuid) -> RepositoryResult<User> {
        self.record("subscribe")?;
        let mut state = self.state.write().await;

        let subscriber = state
            .users
            .get(&subscriber_id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("user", subscriber_id))?;
        if !state.users.contains_key(&author_id) {
            return Err(RepositoryError::InvalidReference {
                entity: "subscription",
                detail: format!("author {} does not exist", author_id),
            });
        }
        if !state.subscriptions.insert((subscriber_id, author_id)) {
            return Err(RepositoryError::Conflict {
                entity: "subscription",
                detail: format!("{} -> {}", subscriber_id, author_id),
            });
        }
        Ok(subscriber)
    }

    async fn unsubscribe(&self, subscriber_id: Uuid, author_id: Uuid) -> RepositoryResult<()> {
        self.record("unsubscribe")?;
        let mut state = self.state.write().await;
        if !state.subscriptions.remove(&(subscriber_id, author_id)) {
            return Err(RepositoryError::not_found(
                "subscription",
                format!("{} -> {}", subscriber_id, author_id),
            ));
        }
        Ok(())
    }
}
