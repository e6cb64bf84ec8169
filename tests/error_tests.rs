// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_catering::error::{AppError, InternalDetail};

async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[test]
fn test_status_mapping() {
    assert_eq!(AppError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(AppError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
    assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
    assert_eq!(AppError::Conflict("x".into()).status(), StatusCode::CONFLICT);
    assert_eq!(
        AppError::Database("x".into()).status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_client_errors_carry_message() {
    let (status, body) = body_json(AppError::Validation("Name is required".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Name is required");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_internal_detail_kept_out_of_body() {
    let response = AppError::Internal(anyhow::anyhow!("boom")).into_response();
    assert_eq!(
        response.extensions().get::<InternalDetail>().map(|d| d.0.as_str()),
        Some("boom")
    );

    let (status, body) = body_json(AppError::Database("connection reset".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal server error");
    assert!(body.get("error").is_none());
}

#[test]
fn test_client_errors_carry_no_detail() {
    let response = AppError::Conflict("User already exists".into()).into_response();
    assert!(response.extensions().get::<InternalDetail>().is_none());
}
