// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! User model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User ID (also used as document ID)
    pub id: Uuid,
    /// Display name
    pub full_name: String,
    /// Email address, always lowercase
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
    /// Grants access to the admin dashboard
    #[serde(default)]
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Canonical form used for lookups and the uniqueness check.
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }
}
