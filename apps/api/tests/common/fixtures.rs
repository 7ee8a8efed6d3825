//! Test fixtures
//!
//! Seed data is written straight through the repository so that fixture
//! setup never shows up in the GraphQL call accounting.

#![allow(dead_code)]

use uuid::Uuid;

use member_graph_api::models::{
    CreatePost, CreateProfile, CreateUser, MemberTypeId, Post, Profile, User,
};
use member_graph_api::{EntityRepository, MemoryRepository};

pub async fn seed_user(repo: &MemoryRepository, name: &str) -> User {
    repo.create_user(CreateUser {
        name: name.to_string(),
        balance: 100.0,
    })
    .await
    .expect("create user")
}

pub async fn seed_profile(repo: &MemoryRepository, user_id: Uuid, member_type: MemberTypeId) -> Profile {
    repo.create_profile(CreateProfile {
        user_id,
        is_male: true,
        year_of_birth: 1990,
        member_type_id: member_type,
    })
    .await
    .expect("create profile")
}

pub async fn seed_post(repo: &MemoryRepository, author_id: Uuid, title: &str) -> Post {
    repo.create_post(CreatePost {
        title: title.to_string(),
        content: format!("{} content", title),
        author_id,
    })
    .await
    .expect("create post")
}

/// `count` users, each with a profile and two posts
pub async fn seed_community(repo: &MemoryRepository, count: usize) -> Vec<User> {
    let mut users = Vec::with_capacity(count);
    for i in 0..count {
        let user = seed_user(repo, &format!("user-{}", i)).await;
        let member_type = if i % 2 == 0 {
            MemberTypeId::Basic
        } else {
            MemberTypeId::Business
        };
        seed_profile(repo, user.id, member_type).await;
        seed_post(repo, user.id, &format!("first by {}", i)).await;
        seed_post(repo, user.id, &format!("second by {}", i)).await;
        users.push(user);
    }
    repo.reset_calls();
    users
}
