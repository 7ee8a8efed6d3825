//! Database models for the member graph
//!
//! This module contains SQLx models for:
//! - Member types (reference data)
//! - Users and the subscription relation between them
//! - Profiles and posts

pub mod member_type;
pub mod post;
pub mod profile;
pub mod user;

pub use member_type::{MemberType, MemberTypeId};
pub use post::{ChangePost, CreatePost, Post};
pub use profile::{ChangeProfile, CreateProfile, Profile};
pub use user::{ChangeUser, CreateUser, LinkedUser, User};
