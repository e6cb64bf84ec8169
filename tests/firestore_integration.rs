// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running and
//! FIRESTORE_EMULATOR_HOST to point at it. They are skipped otherwise.
//!
//! IDs are random per run, so the emulator does not need to be reset.

use chrono::Utc;
use sea_catering::db::firestore::email_doc_id;
use sea_catering::db::{collections, Store};
use sea_catering::error::AppError;
use sea_catering::models::subscription::NewSubscription;
use sea_catering::models::{
    DeliveryDay, MealType, StatusChange, Subscription, SubscriptionStatus, Testimonial, User,
};
use serde_json::json;
use uuid::Uuid;

mod common;
use common::test_db;

fn test_user() -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        full_name: "Test User".to_string(),
        email: format!("{}@example.com", Uuid::new_v4()),
        password_hash: "$argon2id$placeholder".to_string(),
        is_admin: false,
        created_at: now,
        updated_at: now,
    }
}

fn test_subscription(user_id: Uuid) -> Subscription {
    Subscription::new(
        user_id,
        NewSubscription {
            name: "Test".to_string(),
            phone: "0812345678".to_string(),
            plan_name: "Diet Plan".to_string(),
            plan_price: 30_000,
            meal_types: vec![MealType::Lunch, MealType::Dinner],
            delivery_days: vec![DeliveryDay::Monday, DeliveryDay::Thursday],
            allergies: String::new(),
        },
        Utc::now(),
    )
    .unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
// USER TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_user_round_trip_and_email_lookup() {
    require_emulator!();

    let db = test_db().await;
    let user = test_user();

    assert!(db.get_user(user.id).await.unwrap().is_none());
    db.insert_user(&user).await.unwrap();

    let fetched = db.get_user(user.id).await.unwrap().unwrap();
    assert_eq!(fetched.email, user.email);

    let by_email = db.find_user_by_email(&user.email).await.unwrap().unwrap();
    assert_eq!(by_email.id, user.id);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    require_emulator!();

    let db = test_db().await;
    let first = test_user();
    db.insert_user(&first).await.unwrap();

    let mut second = test_user();
    second.email = first.email.clone();
    let err = db.insert_user(&second).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
    assert!(db.get_user(second.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_orphaned_email_index_is_reclaimed() {
    require_emulator!();

    let db = test_db().await;
    let user = test_user();

    // An index entry whose user document was never written
    let _: () = db
        .client()
        .fluent()
        .update()
        .in_col(collections::USER_EMAILS)
        .document_id(email_doc_id(&user.email))
        .object(&json!({ "user_id": Uuid::new_v4() }))
        .execute()
        .await
        .unwrap();
    assert!(db.find_user_by_email(&user.email).await.unwrap().is_none());

    db.insert_user(&user).await.unwrap();

    let by_email = db.find_user_by_email(&user.email).await.unwrap().unwrap();
    assert_eq!(by_email.id, user.id);

    let mut again = test_user();
    again.email = user.email.clone();
    assert!(matches!(
        db.insert_user(&again).await,
        Err(AppError::Conflict(_))
    ));
}

// ═══════════════════════════════════════════════════════════════════════════
// SUBSCRIPTION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_subscription_status_persists() {
    require_emulator!();

    let db = test_db().await;
    let user_id = Uuid::new_v4();
    let mut sub = test_subscription(user_id);
    db.insert_subscription(&sub).await.unwrap();

    let from = chrono::NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
    let to = chrono::NaiveDate::from_ymd_opt(2025, 7, 14).unwrap();
    sub.apply(StatusChange::Pause { from, to }, Utc::now()).unwrap();
    db.update_subscription(&sub).await.unwrap();

    let fetched = db.get_subscription(sub.id).await.unwrap().unwrap();
    assert_eq!(fetched.status, SubscriptionStatus::Paused);
    assert_eq!(fetched.paused_from, Some(from));
    assert_eq!(fetched.paused_to, Some(to));
    assert_eq!(fetched.meal_types, vec![MealType::Lunch, MealType::Dinner]);
}

#[tokio::test]
async fn test_subscription_queries_filter() {
    require_emulator!();

    let db = test_db().await;
    let user_id = Uuid::new_v4();
    let active = test_subscription(user_id);
    let mut cancelled = test_subscription(user_id);
    cancelled.apply(StatusChange::Cancel, Utc::now()).unwrap();
    db.insert_subscription(&active).await.unwrap();
    db.insert_subscription(&cancelled).await.unwrap();

    let mine = db.list_subscriptions_for_user(user_id).await.unwrap();
    assert_eq!(mine.len(), 2);

    let cancelled_ids: Vec<Uuid> = db
        .list_subscriptions(Some(SubscriptionStatus::Cancelled))
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert!(cancelled_ids.contains(&cancelled.id));
    assert!(!cancelled_ids.contains(&active.id));
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTIMONIAL TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_testimonial_approval_toggle() {
    require_emulator!();

    let db = test_db().await;
    let now = Utc::now();
    let testimonial = Testimonial {
        id: Uuid::new_v4(),
        customer_name: "Sari".to_string(),
        message: "Lovely".to_string(),
        rating: 5,
        is_approved: false,
        created_at: now,
        updated_at: now,
    };
    db.insert_testimonial(&testimonial).await.unwrap();

    let approved_ids = |list: Vec<Testimonial>| list.into_iter().map(|t| t.id).collect::<Vec<_>>();
    assert!(!approved_ids(db.list_testimonials(true).await.unwrap()).contains(&testimonial.id));

    let updated = db
        .set_testimonial_approval(testimonial.id, true, Utc::now())
        .await
        .unwrap()
        .unwrap();
    assert!(updated.is_approved);
    assert!(approved_ids(db.list_testimonials(true).await.unwrap()).contains(&testimonial.id));

    assert!(db
        .set_testimonial_approval(Uuid::new_v4(), true, Utc::now())
        .await
        .unwrap()
        .is_none());
}
