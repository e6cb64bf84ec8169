// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Customer subscription routes.

use crate::error::Result;
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::models::subscription::NewSubscription;
use crate::models::{DeliveryDay, MealType, Subscription, SubscriptionStatus};
use crate::routes::parse_id;
use crate::time_utils::{deserialize_optional_date, format_utc_rfc3339};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

const NOT_FOUND: &str = "Subscription not found";

/// Subscription routes (auth middleware applied in routes/mod.rs).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/subscriptions", post(create_subscription))
        .route("/api/subscriptions/my-subscriptions", get(my_subscriptions))
        .route("/api/subscriptions/{id}", get(get_subscription))
        .route("/api/subscriptions/{id}/status", put(update_status))
}

/// Subscription as returned to clients.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SubscriptionResponse {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub phone: String,
    pub plan_name: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub plan_price: i64,
    pub meal_types: Vec<MealType>,
    pub delivery_days: Vec<DeliveryDay>,
    pub allergies: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_price: i64,
    pub status: SubscriptionStatus,
    /// `YYYY-MM-DD`
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub paused_from: Option<NaiveDate>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub paused_to: Option<NaiveDate>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(sub: Subscription) -> Self {
        Self {
            id: sub.id.to_string(),
            user_id: sub.user_id.to_string(),
            name: sub.name,
            phone: sub.phone,
            plan_name: sub.plan_name,
            plan_price: sub.plan_price,
            meal_types: sub.meal_types,
            delivery_days: sub.delivery_days,
            allergies: sub.allergies,
            total_price: sub.total_price,
            status: sub.status,
            paused_from: sub.paused_from,
            paused_to: sub.paused_to,
            created_at: format_utc_rfc3339(sub.created_at),
            updated_at: format_utc_rfc3339(sub.updated_at),
        }
    }
}

#[derive(Serialize)]
pub struct SubscriptionEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub subscription: SubscriptionResponse,
}

#[derive(Serialize)]
pub struct SubscriptionsResponse {
    pub success: bool,
    pub subscriptions: Vec<SubscriptionResponse>,
}

// ─── Create ──────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateSubscriptionRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Plan name is required"))]
    pub plan_name: String,
    #[validate(range(min = 1, message = "Plan price must be a positive amount"))]
    pub plan_price: i64,
    #[validate(length(min = 1, message = "At least one meal type is required"))]
    pub meal_types: Vec<MealType>,
    #[validate(length(min = 1, message = "At least one delivery day is required"))]
    pub delivery_days: Vec<DeliveryDay>,
    pub allergies: Option<String>,
    /// Client-side estimate, checked against the server calculation
    #[validate(required(message = "Total price is required"))]
    pub total_price: Option<i64>,
}

async fn create_subscription(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(req): ValidatedJson<CreateSubscriptionRequest>,
) -> Result<(StatusCode, Json<SubscriptionEnvelope>)> {
    let draft = NewSubscription {
        name: req.name,
        phone: req.phone,
        plan_name: req.plan_name,
        plan_price: req.plan_price,
        meal_types: req.meal_types,
        delivery_days: req.delivery_days,
        allergies: req.allergies.unwrap_or_default(),
    };

    let subscription = state
        .subscriptions
        .create(user.id, draft, req.total_price)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubscriptionEnvelope {
            success: true,
            message: Some("Subscription created successfully".to_string()),
            subscription: subscription.into(),
        }),
    ))
}

// ─── Read ────────────────────────────────────────────────────

async fn my_subscriptions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<SubscriptionsResponse>> {
    let subscriptions = state.subscriptions.list_mine(user.id).await?;

    Ok(Json(SubscriptionsResponse {
        success: true,
        subscriptions: subscriptions.into_iter().map(Into::into).collect(),
    }))
}

async fn get_subscription(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<SubscriptionEnvelope>> {
    let id = parse_id(&id, NOT_FOUND)?;
    let subscription = state.subscriptions.get_mine(user.id, id).await?;

    Ok(Json(SubscriptionEnvelope {
        success: true,
        message: None,
        subscription: subscription.into(),
    }))
}

// ─── Status ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: SubscriptionStatus,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub paused_from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub paused_to: Option<NaiveDate>,
}

async fn update_status(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateStatusRequest>,
) -> Result<Json<SubscriptionEnvelope>> {
    let id = parse_id(&id, NOT_FOUND)?;

    let subscription = state
        .subscriptions
        .update_status(user.id, id, req.status, req.paused_from, req.paused_to)
        .await?;

    Ok(Json(SubscriptionEnvelope {
        success: true,
        message: Some(format!(
            "Subscription {} successfully",
            past_tense(subscription.status)
        )),
        subscription: subscription.into(),
    }))
}

fn past_tense(status: SubscriptionStatus) -> &'static str {
    match status {
        SubscriptionStatus::Active => "activated",
        SubscriptionStatus::Paused => "paused",
        SubscriptionStatus::Cancelled => "cancelled",
    }
}
