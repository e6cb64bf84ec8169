// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Public testimonial routes.

use crate::error::Result;
use crate::extract::ValidatedJson;
use crate::models::testimonial::{MAX_RATING, MIN_RATING};
use crate::models::Testimonial;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/testimonials",
        get(list_testimonials).post(create_testimonial),
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TestimonialResponse {
    pub id: String,
    pub customer_name: String,
    pub message: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub rating: i64,
    pub is_approved: bool,
    pub created_at: String,
}

impl From<Testimonial> for TestimonialResponse {
    fn from(t: Testimonial) -> Self {
        Self {
            id: t.id.to_string(),
            customer_name: t.customer_name,
            message: t.message,
            rating: t.rating,
            is_approved: t.is_approved,
            created_at: format_utc_rfc3339(t.created_at),
        }
    }
}

#[derive(Serialize)]
pub struct TestimonialsResponse {
    pub success: bool,
    pub testimonials: Vec<TestimonialResponse>,
}

#[derive(Serialize)]
pub struct TestimonialEnvelope {
    pub success: bool,
    pub message: String,
    pub testimonial: TestimonialResponse,
}

async fn list_testimonials(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TestimonialsResponse>> {
    let testimonials = state.testimonials.list_approved().await?;

    Ok(Json(TestimonialsResponse {
        success: true,
        testimonials: testimonials.into_iter().map(Into::into).collect(),
    }))
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateTestimonialRequest {
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub customer_name: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    #[validate(range(
        min = MIN_RATING,
        max = MAX_RATING,
        message = "Rating must be between 1 and 5"
    ))]
    pub rating: i64,
}

async fn create_testimonial(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateTestimonialRequest>,
) -> Result<(StatusCode, Json<TestimonialEnvelope>)> {
    let testimonial = state
        .testimonials
        .create(&req.customer_name, &req.message, req.rating)
        .await?;

    let message = if testimonial.is_approved {
        "Testimonial submitted successfully"
    } else {
        "Testimonial submitted and awaiting approval"
    };

    Ok((
        StatusCode::CREATED,
        Json(TestimonialEnvelope {
            success: true,
            message: message.to_string(),
            testimonial: testimonial.into(),
        }),
    ))
}
