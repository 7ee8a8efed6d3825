//! GraphQL type definitions
//!
//! Object types wrap the database models and resolve their relations
//! through the request's batch loaders.

mod member_type;
mod post;
mod profile;
mod user;

pub use member_type::{MemberType, MemberTypeId};
pub use post::Post;
pub use profile::Profile;
pub use user::User;
