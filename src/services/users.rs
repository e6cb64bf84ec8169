// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Profile reads and updates for the signed-in user.

use crate::db::Store;
use crate::error::{AppError, Result};
use crate::models::User;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserService {
    db: Arc<dyn Store>,
}

impl UserService {
    pub fn new(db: Arc<dyn Store>) -> Self {
        Self { db }
    }

    pub async fn get_profile(&self, user_id: Uuid) -> Result<User> {
        self.db
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Change the display name.
    pub async fn update_profile(&self, user_id: Uuid, full_name: &str) -> Result<User> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(AppError::Validation("Full name is required".to_string()));
        }

        let mut user = self.get_profile(user_id).await?;
        user.full_name = full_name.to_string();
        user.updated_at = Utc::now();
        self.db.update_user(&user).await?;

        tracing::info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }
}
