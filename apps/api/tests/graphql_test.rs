//! Integration tests for the GraphQL root operations
//!
//! Covers queries, create/change/delete mutations, subscription edges and
//! document validation, all against the in-memory repository.

mod common;

use common::*;
use member_graph_api::models::MemberTypeId;
use member_graph_api::EntityRepository;
use rstest::rstest;
use serde_json::json;
use uuid::Uuid;

async fn create_user(api: &TestApi, name: &str, balance: f64) -> Uuid {
    let envelope = api
        .execute_with(
            "mutation ($dto: CreateUserInput!) { createUser(dto: $dto) { id } }",
            json!({ "dto": { "name": name, "balance": balance } }),
        )
        .await;
    assert_no_errors(&envelope);
    envelope["data"]["createUser"]["id"]
        .as_str()
        .and_then(|id| id.parse().ok())
        .unwrap()
}

// ========== Queries ==========

#[tokio::test]
async fn test_member_types_are_seeded() {
    let api = TestApi::new();

    let data = api
        .data("{ memberTypes { id discount postsLimitPerMonth } }")
        .await;

    assert_eq!(
        data["memberTypes"],
        json!([
            { "id": "basic", "discount": 2.3, "postsLimitPerMonth": 20 },
            { "id": "business", "discount": 7.7, "postsLimitPerMonth": 100 },
        ])
    );
}

#[tokio::test]
async fn test_member_type_by_id() {
    let api = TestApi::new();

    let data = api
        .data("{ memberType(id: business) { id postsLimitPerMonth } }")
        .await;

    assert_eq!(data["memberType"]["postsLimitPerMonth"], 100);
}

#[tokio::test]
async fn test_unknown_ids_resolve_to_null() {
    let api = TestApi::new();
    let missing = Uuid::new_v4();

    let envelope = api
        .execute_with(
            "query ($id: UUID!) { user(id: $id) { id } post(id: $id) { id } profile(id: $id) { id } }",
            json!({ "id": missing }),
        )
        .await;

    assert_no_errors(&envelope);
    assert_eq!(
        envelope["data"],
        json!({ "user": null, "post": null, "profile": null })
    );
}

#[tokio::test]
async fn test_new_user_has_no_posts() {
    let api = TestApi::new();
    let ann = create_user(&api, "Ann", 100.0).await;

    let envelope = api
        .execute_with(
            "query ($id: UUID!) { user(id: $id) { name balance posts { id } } }",
            json!({ "id": ann }),
        )
        .await;

    assert_no_errors(&envelope);
    assert_eq!(
        envelope["data"]["user"],
        json!({ "name": "Ann", "balance": "100", "posts": [] })
    );
}

#[tokio::test]
async fn test_profile_exposes_foreign_keys_and_relations() {
    let api = TestApi::new();
    let owner = seed_user(&api.repo, "owner").await;
    let profile = seed_profile(&api.repo, owner.id, MemberTypeId::Business).await;

    let envelope = api
        .execute_with(
            "query ($id: UUID!) { profile(id: $id) { userId memberTypeId user { name } memberType { id } } }",
            json!({ "id": profile.id }),
        )
        .await;

    assert_no_errors(&envelope);
    assert_eq!(
        envelope["data"]["profile"],
        json!({
            "userId": owner.id,
            "memberTypeId": "business",
            "user": { "name": "owner" },
            "memberType": { "id": "business" },
        })
    );
}

// ========== Mutations ==========

#[tokio::test]
async fn test_create_profile_and_post() {
    let api = TestApi::new();
    let user = create_user(&api, "writer", 5.5).await;

    let envelope = api
        .execute_with(
            r#"mutation ($profile: CreateProfileInput!, $post: CreatePostInput!) {
                createProfile(dto: $profile) { isMale yearOfBirth memberType { id } }
                createPost(dto: $post) { title content authorId author { name } }
            }"#,
            json!({
                "profile": { "userId": user, "isMale": false, "yearOfBirth": 1985, "memberTypeId": "basic" },
                "post": { "title": "hello", "authorId": user, "content": "world" },
            }),
        )
        .await;

    assert_no_errors(&envelope);
    assert_eq!(
        envelope["data"]["createProfile"],
        json!({ "isMale": false, "yearOfBirth": 1985, "memberType": { "id": "basic" } })
    );
    assert_eq!(
        envelope["data"]["createPost"],
        json!({ "title": "hello", "content": "world", "authorId": user, "author": { "name": "writer" } })
    );
}

#[tokio::test]
async fn test_second_profile_for_a_user_is_rejected() {
    let api = TestApi::new();
    let user = seed_user(&api.repo, "once").await;
    seed_profile(&api.repo, user.id, MemberTypeId::Basic).await;

    let envelope = api
        .execute_with(
            "mutation ($dto: CreateProfileInput!) { createProfile(dto: $dto) { id } }",
            json!({ "dto": { "userId": user.id, "isMale": true, "yearOfBirth": 2000, "memberTypeId": "business" } }),
        )
        .await;

    let messages = error_messages(&envelope);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("already exists"), "{}", messages[0]);
    assert_eq!(envelope["errors"][0]["extensions"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_post_for_missing_author_is_rejected() {
    let api = TestApi::new();

    let envelope = api
        .execute_with(
            "mutation ($dto: CreatePostInput!) { createPost(dto: $dto) { id } }",
            json!({ "dto": { "title": "t", "authorId": Uuid::new_v4(), "content": "c" } }),
        )
        .await;

    assert_eq!(envelope["errors"][0]["extensions"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_change_mutations_only_touch_given_fields() {
    let api = TestApi::new();
    let user = seed_user(&api.repo, "before").await;
    let post = seed_post(&api.repo, user.id, "title").await;
    let profile = seed_profile(&api.repo, user.id, MemberTypeId::Basic).await;

    let envelope = api
        .execute_with(
            r#"mutation ($user: UUID!, $post: UUID!, $profile: UUID!) {
                changeUser(id: $user, dto: { balance: 42.5 }) { name balance }
                changePost(id: $post, dto: { content: "edited" }) { title content }
                changeProfile(id: $profile, dto: { yearOfBirth: 1970 }) { isMale yearOfBirth }
            }"#,
            json!({ "user": user.id, "post": post.id, "profile": profile.id }),
        )
        .await;

    assert_no_errors(&envelope);
    assert_eq!(
        envelope["data"],
        json!({
            "changeUser": { "name": "before", "balance": "42.5" },
            "changePost": { "title": "title", "content": "edited" },
            "changeProfile": { "isMale": true, "yearOfBirth": 1970 },
        })
    );
}

#[tokio::test]
async fn test_change_of_missing_record_is_an_error() {
    let api = TestApi::new();

    let envelope = api
        .execute_with(
            "mutation ($id: UUID!) { changeUser(id: $id, dto: { name: \"x\" }) { id } }",
            json!({ "id": Uuid::new_v4() }),
        )
        .await;

    assert_eq!(envelope["errors"][0]["extensions"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_delete_missing_post_returns_false_without_errors() {
    let api = TestApi::new();

    let envelope = api
        .execute_with(
            "mutation ($id: UUID!) { deletePost(id: $id) }",
            json!({ "id": Uuid::new_v4() }),
        )
        .await;

    assert_no_errors(&envelope);
    assert_eq!(envelope["data"]["deletePost"], false);
}

#[rstest]
#[case::literal_null("mutation { deleteUser(id: null) deleteProfile(id: null) deletePost(id: null) }")]
#[case::omitted("mutation { deleteUser deleteProfile deletePost }")]
#[tokio::test]
async fn test_delete_without_id_returns_false(#[case] mutation: &str) {
    let api = TestApi::new();
    seed_community(&api.repo, 1).await;

    let envelope = api.execute(mutation).await;

    assert_no_errors(&envelope);
    assert_eq!(
        envelope["data"],
        json!({ "deleteUser": false, "deleteProfile": false, "deletePost": false })
    );
    assert_eq!(api.repo.total_calls(), 0);
}

#[tokio::test]
async fn test_delete_failure_of_any_kind_returns_false() {
    let api = TestApi::new();
    let user = seed_user(&api.repo, "kept").await;
    api.repo.fail_operation("delete_user");

    let envelope = api
        .execute_with(
            "mutation ($id: UUID!) { deleteUser(id: $id) }",
            json!({ "id": user.id }),
        )
        .await;

    assert_no_errors(&envelope);
    assert_eq!(envelope["data"]["deleteUser"], false);
}

#[tokio::test]
async fn test_delete_user_cascades() {
    let api = TestApi::new();
    let users = seed_community(&api.repo, 2).await;
    api.repo
        .subscribe(users[1].id, users[0].id)
        .await
        .unwrap();

    let envelope = api
        .execute_with(
            "mutation ($id: UUID!) { deleteUser(id: $id) }",
            json!({ "id": users[0].id }),
        )
        .await;
    assert_eq!(envelope["data"]["deleteUser"], true);

    let data = api
        .data("{ users { id userSubscribedTo { id } } profiles { id } posts { authorId } }")
        .await;
    assert_eq!(data["users"].as_array().unwrap().len(), 1);
    assert_eq!(data["users"][0]["userSubscribedTo"], json!([]));
    assert_eq!(data["profiles"].as_array().unwrap().len(), 1);
    for post in data["posts"].as_array().unwrap() {
        assert_eq!(post["authorId"], users[1].id.to_string());
    }
}

#[tokio::test]
async fn test_delete_profile_and_post() {
    let api = TestApi::new();
    let user = seed_user(&api.repo, "owner").await;
    let profile = seed_profile(&api.repo, user.id, MemberTypeId::Basic).await;
    let post = seed_post(&api.repo, user.id, "bye").await;

    let envelope = api
        .execute_with(
            "mutation ($profile: UUID!, $post: UUID!) { deleteProfile(id: $profile) deletePost(id: $post) }",
            json!({ "profile": profile.id, "post": post.id }),
        )
        .await;

    assert_eq!(
        envelope["data"],
        json!({ "deleteProfile": true, "deletePost": true })
    );
    let data = api.data("{ profiles { id } posts { id } }").await;
    assert_eq!(data, json!({ "profiles": [], "posts": [] }));
}

// ========== Subscriptions ==========

#[tokio::test]
async fn test_subscribe_shows_up_on_both_sides() {
    let api = TestApi::new();
    let a = create_user(&api, "A", 1.0).await;
    let b = create_user(&api, "B", 2.0).await;

    let envelope = api
        .execute_with(
            "mutation ($a: UUID!, $b: UUID!) { subscribeTo(userId: $a, authorId: $b) { id name } }",
            json!({ "a": a, "b": b }),
        )
        .await;
    assert_no_errors(&envelope);
    assert_eq!(envelope["data"]["subscribeTo"], json!({ "id": a, "name": "A" }));

    let envelope = api
        .execute_with(
            "query ($a: UUID!, $b: UUID!) { b: user(id: $b) { subscribedToUser { id } } a: user(id: $a) { userSubscribedTo { id } } }",
            json!({ "a": a, "b": b }),
        )
        .await;
    assert_no_errors(&envelope);
    assert_eq!(envelope["data"]["b"]["subscribedToUser"], json!([{ "id": a }]));
    assert_eq!(envelope["data"]["a"]["userSubscribedTo"], json!([{ "id": b }]));
}

#[tokio::test]
async fn test_unsubscribe_returns_whether_an_edge_was_removed() {
    let api = TestApi::new();
    let a = seed_user(&api.repo, "A").await;
    let b = seed_user(&api.repo, "B").await;
    api.repo.subscribe(a.id, b.id).await.unwrap();
    let mutation = "mutation ($a: UUID!, $b: UUID!) { unsubscribeFrom(userId: $a, authorId: $b) }";
    let variables = json!({ "a": a.id, "b": b.id });

    let first = api.execute_with(mutation, variables.clone()).await;
    let second = api.execute_with(mutation, variables).await;

    assert_eq!(first["data"]["unsubscribeFrom"], true);
    assert_no_errors(&second);
    assert_eq!(second["data"]["unsubscribeFrom"], false);
}

#[tokio::test]
async fn test_duplicate_subscription_is_a_conflict() {
    let api = TestApi::new();
    let a = seed_user(&api.repo, "A").await;
    let b = seed_user(&api.repo, "B").await;
    api.repo.subscribe(a.id, b.id).await.unwrap();

    let envelope = api
        .execute_with(
            "mutation ($a: UUID!, $b: UUID!) { subscribeTo(userId: $a, authorId: $b) { id } }",
            json!({ "a": a.id, "b": b.id }),
        )
        .await;

    assert_eq!(envelope["errors"][0]["extensions"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_self_subscription_is_accepted() {
    let api = TestApi::new();
    let a = seed_user(&api.repo, "narcissus").await;

    let envelope = api
        .execute_with(
            "mutation ($a: UUID!) { subscribeTo(userId: $a, authorId: $a) { userSubscribedTo { id } } }",
            json!({ "a": a.id }),
        )
        .await;

    assert_no_errors(&envelope);
    assert_eq!(
        envelope["data"]["subscribeTo"]["userSubscribedTo"],
        json!([{ "id": a.id }])
    );
}

// ========== Validation ==========

#[tokio::test]
async fn test_six_levels_deep_is_rejected_before_any_repository_call() {
    let api = TestApi::new();
    seed_community(&api.repo, 2).await;

    let envelope = api
        .execute("{ users { posts { author { profile { memberType { id } } } } } }")
        .await;

    let messages = error_messages(&envelope);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("too deep"), "{}", messages[0]);
    assert!(envelope["data"].is_null());
    assert_eq!(api.repo.total_calls(), 0);
}

#[tokio::test]
async fn test_five_levels_deep_is_accepted() {
    let api = TestApi::new();
    seed_community(&api.repo, 2).await;

    let envelope = api
        .execute("{ users { profile { memberType { profiles { id } } } } }")
        .await;

    assert_no_errors(&envelope);
}

#[tokio::test]
async fn test_malformed_document_is_rejected() {
    let api = TestApi::new();

    let envelope = api.execute("{ users { id ").await;

    assert_eq!(error_messages(&envelope).len(), 1);
    assert_eq!(api.repo.total_calls(), 0);
}
