//! User model
//!
//! Users own at most one profile, any number of posts, and take part in the
//! self-referential subscription relation.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User record from the users table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Account balance
    pub balance: f64,
}

impl User {
    /// Balance rendered the way the API exposes it (`100` rather than `100.0`)
    pub fn balance_string(&self) -> String {
        self.balance.to_string()
    }
}

/// User creation input
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub balance: f64,
}

/// Partial user update; `None` leaves the column untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeUser {
    pub name: Option<String>,
    pub balance: Option<f64>,
}

impl ChangeUser {
    /// Apply the present fields to an existing record
    pub fn apply(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(balance) = self.balance {
            user.balance = balance;
        }
    }
}

/// A user reached through a subscription edge.
///
/// `link_id` is the id on the other end of the edge: the subscriber when
/// listing authors, the author when listing subscribers.
#[derive(Debug, Clone, FromRow)]
pub struct LinkedUser {
    pub link_id: Uuid,

    #[sqlx(flatten)]
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_string_drops_trailing_zero() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ann".to_string(),
            balance: 100.0,
        };
        assert_eq!(user.balance_string(), "100");

        let user = User {
            balance: 100.5,
            ..user
        };
        assert_eq!(user.balance_string(), "100.5");
    }

    #[test]
    fn test_change_user_applies_only_present_fields() {
        let mut user = User {
            id: Uuid::new_v4(),
            name: "Ann".to_string(),
            balance: 10.0,
        };

        ChangeUser {
            name: None,
            balance: Some(42.0),
        }
        .apply(&mut user);

        assert_eq!(user.name, "Ann");
        assert_eq!(user.balance, 42.0);
    }
}
