//! PostgreSQL repository
//!
//! Runtime-checked `sqlx` queries against the schema in `migrations/`.
//! Batched lookups bind the whole key set as an array and filter with
//! `= ANY($1)`, so one round trip serves every parent in a batch.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use super::utils::{
    map_write_error, MEMBER_TYPE_COLUMNS, POST_COLUMNS, PROFILE_COLUMNS, USER_COLUMNS,
};
use super::{EntityRepository, RepositoryError, RepositoryResult};
use crate::models::{
    ChangePost, ChangeProfile, ChangeUser, CreatePost, CreateProfile, CreateUser, LinkedUser,
    MemberType, MemberTypeId, Post, Profile, User,
};

/// Repository backed by a PostgreSQL connection pool
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    /// Create a new PgRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn member_type_keys(ids: &[MemberTypeId]) -> Vec<&'static str> {
    ids.iter().map(MemberTypeId::as_str).collect()
}

#[async_trait]
impl EntityRepository for PgRepository {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> RepositoryResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    // ==================== Member types ====================

    async fn member_types(&self) -> RepositoryResult<Vec<MemberType>> {
        let sql = format!("SELECT {} FROM member_types ORDER BY id", MEMBER_TYPE_COLUMNS);
        Ok(sqlx::query_as::<_, MemberType>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn member_type(&self, id: MemberTypeId) -> RepositoryResult<Option<MemberType>> {
        let sql = format!("SELECT {} FROM member_types WHERE id = $1", MEMBER_TYPE_COLUMNS);
        Ok(sqlx::query_as::<_, MemberType>(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?)
    }

    #[instrument(level = "debug", skip(self), fields(keys = ids.len()))]
    async fn member_types_by_ids(&self, ids: &[MemberTypeId]) -> RepositoryResult<Vec<MemberType>> {
        let sql = format!(
            "SELECT {} FROM member_types WHERE id = ANY($1) ORDER BY id",
            MEMBER_TYPE_COLUMNS
        );
        Ok(sqlx::query_as::<_, MemberType>(&sql)
            .bind(member_type_keys(ids))
            .fetch_all(&self.pool)
            .await?)
    }

    // ==================== Users ====================

    async fn users(&self) -> RepositoryResult<Vec<User>> {
        let sql = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?)
    }

    async fn user(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    #[instrument(level = "debug", skip(self), fields(keys = ids.len()))]
    async fn users_by_ids(&self, ids: &[Uuid]) -> RepositoryResult<Vec<User>> {
        let sql = format!("SELECT {} FROM users WHERE id = ANY($1) ORDER BY id", USER_COLUMNS);
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?)
    }

    #[instrument(level = "debug", skip(self, input))]
    async fn create_user(&self, input: CreateUser) -> RepositoryResult<User> {
        let sql = format!(
            "INSERT INTO users (id, name, balance) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(&input.name)
            .bind(input.balance)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error("user", e))
    }

    #[instrument(level = "debug", skip(self, input))]
    async fn update_user(&self, id: Uuid, input: ChangeUser) -> RepositoryResult<User> {
        let sql = format!(
            r#"UPDATE users
            SET name = COALESCE($2, name),
                balance = COALESCE($3, balance)
            WHERE id = $1
            RETURNING {}"#,
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(input.name)
            .bind(input.balance)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error("user", e))?
            .ok_or_else(|| RepositoryError::not_found("user", id))
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_user(&self, id: Uuid) -> RepositoryResult<()> {
        // Profile, posts and subscription edges go with the user (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("user", id));
        }
        Ok(())
    }

    // ==================== Profiles ====================

    async fn profiles(&self) -> RepositoryResult<Vec<Profile>> {
        let sql = format!("SELECT {} FROM profiles ORDER BY id", PROFILE_COLUMNS);
        Ok(sqlx::query_as::<_, Profile>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn profile(&self, id: Uuid) -> RepositoryResult<Option<Profile>> {
        let sql = format!("SELECT {} FROM profiles WHERE id = $1", PROFILE_COLUMNS);
        Ok(sqlx::query_as::<_, Profile>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    #[instrument(level = "debug", skip(self), fields(keys = user_ids.len()))]
    async fn profiles_by_user_ids(&self, user_ids: &[Uuid]) -> RepositoryResult<Vec<Profile>> {
        let sql = format!(
            "SELECT {} FROM profiles WHERE user_id = ANY($1) ORDER BY id",
            PROFILE_COLUMNS
        );
        Ok(sqlx::query_as::<_, Profile>(&sql)
            .bind(user_ids)
            .fetch_all(&self.pool)
            .await?)
    }

    #[instrument(level = "debug", skip(self), fields(keys = member_type_ids.len()))]
    async fn profiles_by_member_type_ids(
        &self,
        member_type_ids: &[MemberTypeId],
    ) -> RepositoryResult<Vec<Profile>> {
        let sql = format!(
            "SELECT {} FROM profiles WHERE member_type_id = ANY($1) ORDER BY id",
            PROFILE_COLUMNS
        );
        Ok(sqlx::query_as::<_, Profile>(&sql)
            .bind(member_type_keys(member_type_ids))
            .fetch_all(&self.pool)
            .await?)
    }

    #[instrument(level = "debug", skip(self, input), fields(user_id = %input.user_id))]
    async fn create_profile(&self, input: CreateProfile) -> RepositoryResult<Profile> {
        let sql = format!(
            r#"INSERT INTO profiles (id, is_male, year_of_birth, user_id, member_type_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}"#,
            PROFILE_COLUMNS
        );
        sqlx::query_as::<_, Profile>(&sql)
            .bind(Uuid::new_v4())
            .bind(input.is_male)
            .bind(input.year_of_birth)
            .bind(input.user_id)
            .bind(input.member_type_id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error("profile", e))
    }

    #[instrument(level = "debug", skip(self, input))]
    async fn update_profile(&self, id: Uuid, input: ChangeProfile) -> RepositoryResult<Profile> {
        let sql = format!(
            r#"UPDATE profiles
            SET is_male = COALESCE($2, is_male),
                year_of_birth = COALESCE($3, year_of_birth)
            WHERE id = $1
            RETURNING {}"#,
            PROFILE_COLUMNS
        );
        sqlx::query_as::<_, Profile>(&sql)
            .bind(id)
            .bind(input.is_male)
            .bind(input.year_of_birth)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error("profile", e))?
            .ok_or_else(|| RepositoryError::not_found("profile", id))
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_profile(&self, id: Uuid) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("profile", id));
        }
        Ok(())
    }

    // ==================== Posts ====================

    async fn posts(&self) -> RepositoryResult<Vec<Post>> {
        let sql = format!("SELECT {} FROM posts ORDER BY id", POST_COLUMNS);
        Ok(sqlx::query_as::<_, Post>(&sql).fetch_all(&self.pool).await?)
    }

    async fn post(&self, id: Uuid) -> RepositoryResult<Option<Post>> {
        let sql = format!("SELECT {} FROM posts WHERE id = $1", POST_COLUMNS);
        Ok(sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    #[instrument(level = "debug", skip(self), fields(keys = author_ids.len()))]
    async fn posts_by_author_ids(&self, author_ids: &[Uuid]) -> RepositoryResult<Vec<Post>> {
        let sql = format!(
            "SELECT {} FROM posts WHERE author_id = ANY($1) ORDER BY id",
            POST_COLUMNS
        );
        Ok(sqlx::query_as::<_, Post>(&sql)
            .bind(author_ids)
            .fetch_all(&self.pool)
            .await?)
    }

    #[instrument(level = "debug", skip(self, input), fields(author_id = %input.author_id))]
    async fn create_post(&self, input: CreatePost) -> RepositoryResult<Post> {
        let sql = format!(
            "INSERT INTO posts (id, title, content, author_id) VALUES ($1, $2, $3, $4) RETURNING {}",
            POST_COLUMNS
        );
        sqlx::query_as::<_, Post>(&sql)
            .bind(Uuid::new_v4())
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.author_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error("post", e))
    }

    #[instrument(level = "debug", skip(self, input))]
    async fn update_post(&self, id: Uuid, input: ChangePost) -> RepositoryResult<Post> {
        let sql = format!(
            r#"UPDATE posts
            SET title = COALESCE($2, title),
                content = COALESCE($3, content)
            WHERE id = $1
            RETURNING {}"#,
            POST_COLUMNS
        );
        sqlx::query_as::<_, Post>(&sql)
            .bind(id)
            .bind(input.title)
            .bind(input.content)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error("post", e))?
            .ok_or_else(|| RepositoryError::not_found("post", id))
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_post(&self, id: Uuid) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found("post", id));
        }
        Ok(())
    }

    // ==================== Subscriptions ====================

    #[instrument(level = "debug", skip(self), fields(keys = subscriber_ids.len()))]
    async fn authors_by_subscriber_ids(
        &self,
        subscriber_ids: &[Uuid],
    ) -> RepositoryResult<Vec<LinkedUser>> {
        Ok(sqlx::query_as::<_, LinkedUser>(
            r#"
            SELECT s.subscriber_id AS link_id, u.id, u.name, u.balance
            FROM subscribers_on_authors s
            JOIN users u ON u.id = s.author_id
            WHERE s.subscriber_id = ANY($1)
            ORDER BY u.id
            "#,
        )
        .bind(subscriber_ids)
        .fetch_all(&self.pool)
        .await?)
    }

    #[instrument(level = "debug", skip(self), fields(keys = author_ids.len()))]
    async fn subscribers_by_author_ids(
        &self,
        author_ids: &[Uuid],
    ) -> RepositoryResult<Vec<LinkedUser>> {
        Ok(sqlx::query_as::<_, LinkedUser>(
            r#"
            SELECT s.author_id AS link_id, u.id, u.name, u.balance
            FROM subscribers_on_authors s
            JOIN users u ON u.id = s.subscriber_id
            WHERE s.author_id = ANY($1)
            ORDER BY u.id
            "#,
        )
        .bind(author_ids)
        .fetch_all(&self.pool)
        .await?)
    }

    #[instrument(level = "debug", skip(self))]
    async fn subscribe(&self, subscriber_id: Uuid, author_id: Uuid) -> RepositoryResult<User> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let subscriber = sqlx::query_as::<_, User>(&sql)
            .bind(subscriber_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| RepositoryError::not_found("user", subscriber_id))?;

        sqlx::query("INSERT INTO subscribers_on_authors (subscriber_id, author_id) VALUES ($1, $2)")
            .bind(subscriber_id)
            .bind(author_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_write_error("subscription", e))?;

        tx.commit().await?;
        Ok(subscriber)
    }

    #[instrument(level = "debug", skip(self))]
    async fn unsubscribe(&self, subscriber_id: Uuid, author_id: Uuid) -> RepositoryResult<()> {
        let result = sqlx::query(
            "DELETE FROM subscribers_on_authors WHERE subscriber_id = $1 AND author_id = $2",
        )
        .bind(subscriber_id)
        .bind(author_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found(
                "subscription",
                format!("{} -> {}", subscriber_id, author_id),
            ));
        }
        Ok(())
    }
}
