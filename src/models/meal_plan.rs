// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Meal plan catalog entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A priced category of meal service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlan {
    pub id: Uuid,
    pub name: String,
    /// Price per meal in the smallest currency unit
    pub price: i64,
    pub description: Option<String>,
    /// Selling points, in display order
    #[serde(default)]
    pub features: Vec<String>,
    pub image_url: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}
