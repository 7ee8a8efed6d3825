//! Shared helpers for the PostgreSQL repository

use super::RepositoryError;

// ============================================================================
// SQL Column Constants
//
// SELECT column lists for each entity, kept in one place so every query
// decodes into the same `FromRow` shape.
// ============================================================================

/// SQL columns for member type queries
pub const MEMBER_TYPE_COLUMNS: &str = "id, discount, posts_limit_per_month";

/// SQL columns for user queries
pub const USER_COLUMNS: &str = "id, name, balance";

/// SQL columns for profile queries
pub const PROFILE_COLUMNS: &str = "id, is_male, year_of_birth, user_id, member_type_id";

/// SQL columns for post queries
pub const POST_COLUMNS: &str = "id, title, content, author_id";

/// Translate a failed write into the repository taxonomy.
///
/// Unique violations become [`RepositoryError::Conflict`] and foreign-key
/// violations become [`RepositoryError::InvalidReference`]; anything else is
/// passed through as a database error.
pub fn map_write_error(entity: &'static str, err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return RepositoryError::Conflict {
                entity,
                detail: db_err.message().to_string(),
            };
        }
        if db_err.is_foreign_key_violation() {
            return RepositoryError::InvalidReference {
                entity,
                detail: db_err.message().to_string(),
            };
        }
    }
    RepositoryError::Database(err)
}
