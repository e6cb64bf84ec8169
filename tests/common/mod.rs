// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use sea_catering::config::Config;
use sea_catering::db::{FirestoreDb, MemoryDb, Store};
use sea_catering::models::MealPlan;
use sea_catering::routes::create_router;
use sea_catering::AppState;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Create a test app backed by a fresh in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    create_test_app_with(Config::test_default())
}

#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> (Router, Arc<AppState>) {
    let db: Arc<dyn Store> = Arc::new(MemoryDb::new());
    let state = Arc::new(AppState::new(config, db));
    (create_router(state.clone()), state)
}

/// Build a request with an optional bearer token and JSON body.
#[allow(dead_code)]
pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Send a request and decode the JSON response body (`Value::Null` if empty).
#[allow(dead_code)]
pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

/// Register a customer through the API and log in. Returns `(token, user_id)`.
#[allow(dead_code)]
pub async fn register_and_login(app: &Router, email: &str) -> (String, String) {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/api/auth/register",
            None,
            Some(serde_json::json!({
                "fullName": "Test Customer",
                "email": email,
                "password": "correct horse",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);

    let (status, body) = send(
        app,
        request(
            "POST",
            "/api/auth/login",
            None,
            Some(serde_json::json!({ "email": email, "password": "correct horse" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);

    (
        body["token"].as_str().unwrap().to_string(),
        body["user"]["id"].as_str().unwrap().to_string(),
    )
}

/// Create an admin account directly in the store and return its token.
#[allow(dead_code)]
pub async fn admin_token(state: &AppState) -> String {
    let email = format!("admin-{}@example.com", Uuid::new_v4());
    state
        .auth
        .create_user("Admin", &email, "admin-pass", true)
        .await
        .unwrap();
    let (token, _) = state.auth.login(&email, "admin-pass").await.unwrap();
    token
}

/// Insert a meal plan directly into the store.
#[allow(dead_code)]
pub async fn seed_plan(state: &AppState, name: &str, price: i64, is_active: bool) -> MealPlan {
    let now = Utc::now();
    let plan = MealPlan {
        id: Uuid::new_v4(),
        name: name.to_string(),
        price,
        description: Some(format!("{} description", name)),
        features: vec!["Fresh ingredients".to_string()],
        image_url: None,
        is_active,
        created_at: now,
        updated_at: now,
    };
    state.db.upsert_meal_plan(&plan).await.unwrap();
    plan
}

/// A valid subscription body: Protein Plan, breakfast + dinner, weekdays.
#[allow(dead_code)]
pub fn subscription_body() -> Value {
    serde_json::json!({
        "name": "Budi Santoso",
        "phone": "08123456789",
        "planName": "Protein Plan",
        "planPrice": 40000,
        "mealTypes": ["Breakfast", "Dinner"],
        "deliveryDays": ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"],
        "allergies": "Peanuts",
        "totalPrice": 1720000,
    })
}
