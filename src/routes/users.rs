// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Profile routes for the signed-in user.

use crate::error::Result;
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::routes::auth::UserEnvelope;
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// Profile routes (auth middleware applied in routes/mod.rs).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/users/profile", get(get_profile).put(update_profile))
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserEnvelope>> {
    let profile = state.users.get_profile(user.id).await?;

    Ok(Json(UserEnvelope {
        success: true,
        message: None,
        user: profile.into(),
    }))
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
}

async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<UserEnvelope>> {
    let profile = state.users.update_profile(user.id, &req.full_name).await?;

    Ok(Json(UserEnvelope {
        success: true,
        message: Some("Profile updated successfully".to_string()),
        user: profile.into(),
    }))
}
