// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Public meal plan catalog.

use crate::error::Result;
use crate::models::MealPlan;
use crate::routes::parse_id;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/meal-plans", get(list_meal_plans))
        .route("/api/meal-plans/{id}", get(get_meal_plan))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MealPlanResponse {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub price: i64,
    pub description: Option<String>,
    pub features: Vec<String>,
    pub image_url: Option<String>,
}

impl From<MealPlan> for MealPlanResponse {
    fn from(plan: MealPlan) -> Self {
        Self {
            id: plan.id.to_string(),
            name: plan.name,
            price: plan.price,
            description: plan.description,
            features: plan.features,
            image_url: plan.image_url,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlansResponse {
    pub success: bool,
    pub meal_plans: Vec<MealPlanResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanEnvelope {
    pub success: bool,
    pub meal_plan: MealPlanResponse,
}

async fn list_meal_plans(State(state): State<Arc<AppState>>) -> Result<Json<MealPlansResponse>> {
    let plans = state.catalog.list_active_plans().await?;

    Ok(Json(MealPlansResponse {
        success: true,
        meal_plans: plans.into_iter().map(Into::into).collect(),
    }))
}

async fn get_meal_plan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MealPlanEnvelope>> {
    let id = parse_id(&id, "Meal plan not found")?;
    let plan = state.catalog.get_plan(id).await?;

    Ok(Json(MealPlanEnvelope {
        success: true,
        meal_plan: plan.into(),
    }))
}
