//! Handler tests for the Members domain
//!
//! These tests verify that HTTP handlers work correctly:
//! - Request deserialization (JSON → Rust structs)
//! - Response serialization (Rust structs → JSON)
//! - HTTP status codes
//! - Error responses
//!
//! They run against the in-memory repository, so they test ONLY the members
//! domain handlers, not the full application with routing, docs, etc.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_members::*;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt; // For oneshot()

fn app() -> (axum::Router, MemberService<InMemoryMemberRepository>) {
    let service = MemberService::new(InMemoryMemberRepository::new());
    (handlers::router(service.clone()), service)
}

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn patch_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn seed(service: &MemberService<InMemoryMemberRepository>, name: &str, email: &str) -> MemberResponse {
    service
        .create_member(CreateMember {
            name: name.to_string(),
            email: email.to_string(),
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn create_member_returns_201_with_zero_cash() {
    let (app, _) = app();

    let request = post_json(
        "/",
        json!({
            "name": "kokodak",
            "email": "kokodak@pacer.com"
        }),
    );

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let member: MemberResponse = json_body(response.into_body()).await;
    assert_eq!(member.name, "kokodak");
    assert_eq!(member.email, "kokodak@pacer.com");
    assert_eq!(member.cash, Cash::zero());
}

#[tokio::test]
async fn create_member_response_includes_timestamps() {
    let (app, _) = app();

    let request = post_json(
        "/",
        json!({
            "name": "kokodak",
            "email": "kokodak@pacer.com"
        }),
    );

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let member: serde_json::Value = json_body(response.into_body()).await;
    assert!(member.get("created_at").is_some());
    assert!(member.get("updated_at").is_some());
    assert_eq!(member["created_at"], member["updated_at"]);
}

#[tokio::test]
async fn create_member_validates_email_format() {
    let (app, _) = app();

    let request = post_json(
        "/",
        json!({
            "name": "kokodak",
            "email": "not-an-email"
        }),
    );

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_member_rejects_blank_name() {
    let (app, _) = app();

    let request = post_json(
        "/",
        json!({
            "name": "   ",
            "email": "blank@pacer.com"
        }),
    );

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_member_returns_200() {
    let (app, service) = app();
    let created = seed(&service, "reader", "reader@pacer.com").await;

    let request = Request::builder()
        .method("GET")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let member: MemberResponse = json_body(response.into_body()).await;
    assert_eq!(member.id, created.id);
    assert_eq!(member.name, "reader");
}

#[tokio::test]
async fn get_member_returns_404_for_missing() {
    let (app, _) = app();

    let request = Request::builder()
        .method("GET")
        .uri("/999")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_member_returns_400_for_malformed_id() {
    let (app, _) = app();

    let request = Request::builder()
        .method("GET")
        .uri("/not-a-number")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["code"], 1002);
    assert_eq!(body["error"], "INVALID_ID");
}

#[tokio::test]
async fn list_members_returns_all() {
    let (app, service) = app();
    seed(&service, "a", "a@pacer.com").await;
    seed(&service, "b", "b@pacer.com").await;

    let request = Request::builder()
        .method("GET")
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let members: MemberResponses = json_body(response.into_body()).await;
    assert_eq!(members.responses.len(), 2);
}

#[tokio::test]
async fn list_members_by_ids_preserves_requested_order() {
    let (app, service) = app();
    let a = seed(&service, "a", "a@pacer.com").await;
    let b = seed(&service, "b", "b@pacer.com").await;
    let c = seed(&service, "c", "c@pacer.com").await;

    let request = Request::builder()
        .method("GET")
        .uri(format!("/?ids={},{},{}", c.id, a.id, b.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let members: MemberResponses = json_body(response.into_body()).await;
    let ids: Vec<MemberId> = members.responses.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![c.id, a.id, b.id]);
}

#[tokio::test]
async fn list_members_by_ids_skips_unknown_ids() {
    let (app, service) = app();
    let a = seed(&service, "a", "a@pacer.com").await;

    let request = Request::builder()
        .method("GET")
        .uri(format!("/?ids=999,{}", a.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let members: MemberResponses = json_body(response.into_body()).await;
    let ids: Vec<MemberId> = members.responses.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![a.id]);
}

#[tokio::test]
async fn list_members_returns_400_for_malformed_ids() {
    let (app, _) = app();

    let request = Request::builder()
        .method("GET")
        .uri("/?ids=1,abc")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["code"], 1002);
}

#[tokio::test]
async fn update_name_returns_200_with_new_name() {
    let (app, service) = app();
    let created = seed(&service, "before", "rename@pacer.com").await;

    let request = patch_json(&format!("/{}/name", created.id), json!({"name": "after"}));

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let member: MemberResponse = json_body(response.into_body()).await;
    assert_eq!(member.name, "after");
    assert_eq!(member.email, "rename@pacer.com");
}

#[tokio::test]
async fn update_name_returns_404_for_missing() {
    let (app, _) = app();

    let request = patch_json("/999/name", json!({"name": "whoever"}));

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_cash_returns_200_with_new_balance() {
    let (app, service) = app();
    let created = seed(&service, "saver", "saver@pacer.com").await;

    let request = patch_json(&format!("/{}/cash", created.id), json!({"cash": "5000"}));

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let member: MemberResponse = json_body(response.into_body()).await;
    assert_eq!(member.cash.amount(), rust_decimal::Decimal::from(5000));
}

#[tokio::test]
async fn update_cash_rejects_negative_amount() {
    let (app, service) = app();
    let created = seed(&service, "saver", "saver@pacer.com").await;

    let request = patch_json(&format!("/{}/cash", created.id), json!({"cash": "-100"}));

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_member_returns_204() {
    let (app, service) = app();
    let created = seed(&service, "gone", "gone@pacer.com").await;

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/{}", created.id))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn delete_member_returns_404_for_missing() {
    let (app, _) = app();

    let request = Request::builder()
        .method("DELETE")
        .uri("/999")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_all_members_returns_204_and_empties_store() {
    let (app, service) = app();
    seed(&service, "a", "a@pacer.com").await;
    seed(&service, "b", "b@pacer.com").await;

    let request = Request::builder()
        .method("DELETE")
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let remaining = service.find_all().await.unwrap();
    assert!(remaining.responses.is_empty());
}
