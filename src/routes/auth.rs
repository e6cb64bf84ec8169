// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Registration, login and current-user routes.

use crate::error::Result;
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::models::User;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidateEmail, ValidationError};

/// Public auth routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
}

/// Auth routes behind the bearer token check (applied in routes/mod.rs).
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/auth/me", get(me))
}

/// Public user fields.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            full_name: user.full_name,
            email: user.email,
            is_admin: user.is_admin,
            created_at: format_utc_rfc3339(user.created_at),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user: UserResponse,
}

// ─── Register ────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(custom(function = "validate_padded_email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Surrounding whitespace is dropped when the address is stored.
fn validate_padded_email(email: &str) -> std::result::Result<(), ValidationError> {
    if email.trim().validate_email() {
        return Ok(());
    }
    let mut err = ValidationError::new("email");
    err.message = Some("Email must be a valid email address".into());
    Err(err)
}

async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserEnvelope>)> {
    let user = state
        .auth
        .register(&req.full_name, &req.email, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserEnvelope {
            success: true,
            message: Some("User registered successfully".to_string()),
            user: user.into(),
        }),
    ))
}

// ─── Login ───────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub user: UserResponse,
}

async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let (token, user) = state.auth.login(&req.email, &req.password).await?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        token,
        user: user.into(),
    }))
}

// ─── Current User ────────────────────────────────────────────

async fn me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserEnvelope>> {
    let user = state.users.get_profile(user.id).await?;

    Ok(Json(UserEnvelope {
        success: true,
        message: None,
        user: user.into(),
    }))
}
