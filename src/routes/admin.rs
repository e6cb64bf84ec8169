// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Admin dashboard routes.
//!
//! Auth and admin middleware are applied in routes/mod.rs.

use crate::error::{AppError, Result};
use crate::extract::{ValidatedJson, ValidatedQuery};
use crate::middleware::auth::AuthUser;
use crate::models::{AdminStats, DateRange, PageParams, Pagination, SubscriptionStatus};
use crate::routes::auth::UserResponse;
use crate::routes::parse_id;
use crate::routes::subscriptions::SubscriptionResponse;
use crate::routes::testimonials::{TestimonialEnvelope, TestimonialsResponse};
use crate::services::{SubscriptionWithOwner, UserWithCount};
use crate::time_utils::parse_date;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/admin/stats", get(get_stats))
        .route("/api/admin/subscriptions", get(list_subscriptions))
        .route("/api/admin/users", get(list_users))
        .route("/api/admin/testimonials", get(list_testimonials))
        .route(
            "/api/admin/testimonials/{id}/approval",
            put(update_testimonial_approval),
        )
}

// ─── Stats ───────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StatsQuery {
    start_date: Option<String>,
    end_date: Option<String>,
}

fn parse_bound(raw: Option<&str>, name: &str) -> Result<Option<chrono::NaiveDate>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => parse_date(value)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("Invalid {} '{}'", name, value))),
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: AdminStats,
}

async fn get_stats(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<StatsQuery>,
) -> Result<Json<StatsResponse>> {
    let start = parse_bound(query.start_date.as_deref(), "startDate")?;
    let end = parse_bound(query.end_date.as_deref(), "endDate")?;
    let range = DateRange::from_bounds(start, end).map_err(AppError::Validation)?;

    let stats = state.admin.stats(range).await?;

    Ok(Json(StatsResponse {
        success: true,
        stats,
    }))
}

// ─── Subscriptions ───────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SubscriptionsQuery {
    page: Option<u32>,
    limit: Option<u32>,
    status: Option<String>,
}

/// `None` and `all` both mean no filter.
fn parse_status_filter(raw: Option<&str>) -> Result<Option<SubscriptionStatus>> {
    match raw.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(AppError::Validation),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSubscriptionResponse {
    #[serde(flatten)]
    pub subscription: SubscriptionResponse,
    pub user_full_name: Option<String>,
    pub user_email: Option<String>,
}

impl From<SubscriptionWithOwner> for AdminSubscriptionResponse {
    fn from(row: SubscriptionWithOwner) -> Self {
        let (user_full_name, user_email) = match row.owner {
            Some(owner) => (Some(owner.full_name), Some(owner.email)),
            None => (None, None),
        };
        Self {
            subscription: row.subscription.into(),
            user_full_name,
            user_email,
        }
    }
}

#[derive(Serialize)]
pub struct AdminSubscriptionsResponse {
    pub success: bool,
    pub subscriptions: Vec<AdminSubscriptionResponse>,
    pub pagination: Pagination,
}

async fn list_subscriptions(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(query): ValidatedQuery<SubscriptionsQuery>,
) -> Result<Json<AdminSubscriptionsResponse>> {
    let params = PageParams::new(query.page, query.limit).validate()?;
    let status = parse_status_filter(query.status.as_deref())?;

    let (rows, pagination) = state.admin.list_subscriptions(params, status).await?;

    Ok(Json(AdminSubscriptionsResponse {
        success: true,
        subscriptions: rows.into_iter().map(Into::into).collect(),
        pagination,
    }))
}

// ─── Users ───────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub subscription_count: u64,
}

impl From<UserWithCount> for AdminUserResponse {
    fn from(row: UserWithCount) -> Self {
        Self {
            user: row.user.into(),
            subscription_count: row.subscription_count,
        }
    }
}

#[derive(Serialize)]
pub struct AdminUsersResponse {
    pub success: bool,
    pub users: Vec<AdminUserResponse>,
    pub pagination: Pagination,
}

async fn list_users(
    State(state): State<Arc<AppState>>,
    ValidatedQuery(params): ValidatedQuery<PageParams>,
) -> Result<Json<AdminUsersResponse>> {
    let params = params.validate()?;
    let (rows, pagination) = state.admin.list_users(params).await?;

    Ok(Json(AdminUsersResponse {
        success: true,
        users: rows.into_iter().map(Into::into).collect(),
        pagination,
    }))
}

// ─── Testimonials ────────────────────────────────────────────

async fn list_testimonials(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TestimonialsResponse>> {
    let testimonials = state.testimonials.list_all().await?;

    Ok(Json(TestimonialsResponse {
        success: true,
        testimonials: testimonials.into_iter().map(Into::into).collect(),
    }))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRequest {
    pub is_approved: bool,
}

async fn update_testimonial_approval(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<AuthUser>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<ApprovalRequest>,
) -> Result<Json<TestimonialEnvelope>> {
    let id = parse_id(&id, "Testimonial not found")?;
    let testimonial = state
        .testimonials
        .set_approval(admin.id, id, req.is_approved)
        .await?;

    Ok(Json(TestimonialEnvelope {
        success: true,
        message: "Testimonial approval status updated".to_string(),
        testimonial: testimonial.into(),
    }))
}
