//! Member type model
//!
//! Member types are read-only reference data seeded by the initial migration.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Member type identifier matching the `member_types.id` column
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemberTypeId {
    Basic,
    Business,
}

impl MemberTypeId {
    /// Every member type id, in id order
    pub const ALL: [Self; 2] = [Self::Basic, Self::Business];

    /// Returns the string stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberTypeId::Basic => "basic",
            MemberTypeId::Business => "business",
        }
    }
}

impl std::fmt::Display for MemberTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MemberTypeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Self::Basic),
            "business" => Ok(Self::Business),
            other => Err(format!("unknown member type: {}", other)),
        }
    }
}

/// Member type record from the member_types table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct MemberType {
    /// Member type identifier
    pub id: MemberTypeId,

    /// Discount rate granted to members of this type
    pub discount: f64,

    /// Maximum number of posts per month
    pub posts_limit_per_month: i32,
}

impl MemberType {
    /// The reference rows inserted by the initial migration
    pub fn seed() -> Vec<Self> {
        vec![
            Self {
                id: MemberTypeId::Basic,
                discount: 2.3,
                posts_limit_per_month: 20,
            },
            Self {
                id: MemberTypeId::Business,
                discount: 7.7,
                posts_limit_per_month: 100,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_type_id_round_trips_through_str() {
        for id in MemberTypeId::ALL {
            assert_eq!(id.as_str().parse::<MemberTypeId>(), Ok(id));
        }
        assert!("premium".parse::<MemberTypeId>().is_err());
    }

    #[test]
    fn test_seed_covers_every_member_type() {
        let seeded: Vec<_> = MemberType::seed().into_iter().map(|m| m.id).collect();
        assert_eq!(seeded, MemberTypeId::ALL.to_vec());
    }

    #[test]
    fn test_member_type_id_serializes_lowercase() {
        let json = serde_json::to_string(&MemberTypeId::Business).expect("serialize");
        assert_eq!(json, "\"business\"");
    }
}
