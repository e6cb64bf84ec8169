// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Customer testimonial model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lowest accepted rating.
pub const MIN_RATING: i64 = 1;
/// Highest accepted rating.
pub const MAX_RATING: i64 = 5;

/// Stored testimonial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: Uuid,
    pub customer_name: String,
    pub message: String,
    /// 1 to 5 stars
    pub rating: i64,
    /// Only approved testimonials are shown publicly
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
