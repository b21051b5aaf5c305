//! Postgres repository tests for the Members domain
//!
//! These run against a real PostgreSQL container via testcontainers and are
//! ignored by default; run them with `cargo test -- --ignored` when Docker is
//! available.

use domain_members::*;
use rust_decimal::Decimal;
use test_utils::{TestDataBuilder, TestDatabase};

fn create_input(builder: &TestDataBuilder, suffix: &str) -> CreateMember {
    CreateMember {
        name: builder.name("member", suffix),
        email: builder.email(suffix),
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn create_and_find_member_roundtrip() {
    let db = TestDatabase::new().await;
    let repo = PgMemberRepository::new(db.connection());
    let service = MemberService::new(repo);
    let builder = TestDataBuilder::from_test_name("pg_roundtrip");

    let created = service
        .create_member(create_input(&builder, "main"))
        .await
        .unwrap();

    let fetched = service.find_member(created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.cash, Cash::zero());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn storage_assigns_increasing_ids() {
    let db = TestDatabase::new().await;
    let repo = PgMemberRepository::new(db.connection());
    let service = MemberService::new(repo);
    let builder = TestDataBuilder::from_test_name("pg_ids");

    let first = service
        .create_member(create_input(&builder, "first"))
        .await
        .unwrap();
    let second = service
        .create_member(create_input(&builder, "second"))
        .await
        .unwrap();

    assert!(second.id > first.id);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn duplicate_email_is_a_storage_error() {
    let db = TestDatabase::new().await;
    let repo = PgMemberRepository::new(db.connection());
    let service = MemberService::new(repo);
    let builder = TestDataBuilder::from_test_name("pg_duplicate_email");

    service
        .create_member(create_input(&builder, "main"))
        .await
        .unwrap();

    let result = service
        .create_member(CreateMember {
            name: builder.name("member", "other"),
            email: builder.email("main"),
        })
        .await;

    assert!(matches!(result, Err(MemberError::Internal(_))));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn update_cash_persists_the_new_balance() {
    let db = TestDatabase::new().await;
    let repo = PgMemberRepository::new(db.connection());
    let service = MemberService::new(repo);
    let builder = TestDataBuilder::from_test_name("pg_update_cash");

    let created = service
        .create_member(create_input(&builder, "main"))
        .await
        .unwrap();

    service
        .update_cash(
            created.id,
            UpdateCash {
                cash: Decimal::from(12345),
            },
        )
        .await
        .unwrap();

    let fetched = service.find_member(created.id).await.unwrap();
    assert_eq!(fetched.cash.amount(), Decimal::from(12345));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn find_all_returns_members_in_id_order() {
    let db = TestDatabase::new().await;
    let repo = PgMemberRepository::new(db.connection());
    let service = MemberService::new(repo);
    let builder = TestDataBuilder::from_test_name("pg_find_all_order");

    let a = service
        .create_member(create_input(&builder, "a"))
        .await
        .unwrap();
    let b = service
        .create_member(create_input(&builder, "b"))
        .await
        .unwrap();
    let c = service
        .create_member(create_input(&builder, "c"))
        .await
        .unwrap();

    let responses = service.find_all().await.unwrap();

    let ids: Vec<MemberId> = responses.responses.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![a.id, b.id, c.id]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn find_all_by_id_follows_requested_order() {
    let db = TestDatabase::new().await;
    let repo = PgMemberRepository::new(db.connection());
    let service = MemberService::new(repo);
    let builder = TestDataBuilder::from_test_name("pg_order");

    let a = service
        .create_member(create_input(&builder, "a"))
        .await
        .unwrap();
    let b = service
        .create_member(create_input(&builder, "b"))
        .await
        .unwrap();
    let c = service
        .create_member(create_input(&builder, "c"))
        .await
        .unwrap();

    let responses = service.find_all_by_id(&[c.id, a.id, b.id]).await.unwrap();

    let ids: Vec<MemberId> = responses.responses.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![c.id, a.id, b.id]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn delete_by_id_then_not_found() {
    let db = TestDatabase::new().await;
    let repo = PgMemberRepository::new(db.connection());
    let service = MemberService::new(repo);
    let builder = TestDataBuilder::from_test_name("pg_delete");

    let created = service
        .create_member(create_input(&builder, "main"))
        .await
        .unwrap();

    service.delete_by_id(Some(created.id)).await.unwrap();

    let result = service.find_member(created.id).await;
    assert!(matches!(result, Err(MemberError::NotFound(_))));

    let result = service.delete_by_id(Some(created.id)).await;
    assert!(matches!(result, Err(MemberError::NotFound(_))));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn delete_all_empties_the_table() {
    let db = TestDatabase::new().await;
    let repo = PgMemberRepository::new(db.connection());
    let service = MemberService::new(repo);
    let builder = TestDataBuilder::from_test_name("pg_delete_all");

    service
        .create_member(create_input(&builder, "a"))
        .await
        .unwrap();
    service
        .create_member(create_input(&builder, "b"))
        .await
        .unwrap();

    service.delete_all().await.unwrap();

    let remaining = service.find_all().await.unwrap();
    assert!(remaining.responses.is_empty());
}
