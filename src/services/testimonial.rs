// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Customer testimonials and moderation.

use crate::db::Store;
use crate::error::{AppError, Result};
use crate::models::testimonial::{MAX_RATING, MIN_RATING};
use crate::models::Testimonial;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

fn newest_first(testimonials: &mut [Testimonial]) {
    testimonials.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[derive(Clone)]
pub struct TestimonialService {
    db: Arc<dyn Store>,
    /// New testimonials wait for an admin before they are shown
    require_approval: bool,
}

impl TestimonialService {
    pub fn new(db: Arc<dyn Store>, require_approval: bool) -> Self {
        Self {
            db,
            require_approval,
        }
    }

    /// Publicly visible testimonials, newest first.
    pub async fn list_approved(&self) -> Result<Vec<Testimonial>> {
        let mut testimonials = self.db.list_testimonials(true).await?;
        newest_first(&mut testimonials);
        Ok(testimonials)
    }

    /// Every testimonial regardless of approval, newest first.
    pub async fn list_all(&self) -> Result<Vec<Testimonial>> {
        let mut testimonials = self.db.list_testimonials(false).await?;
        newest_first(&mut testimonials);
        Ok(testimonials)
    }

    pub async fn create(
        &self,
        customer_name: &str,
        message: &str,
        rating: i64,
    ) -> Result<Testimonial> {
        let customer_name = customer_name.trim();
        let message = message.trim();

        if customer_name.is_empty() {
            return Err(AppError::Validation(
                "Customer name is required".to_string(),
            ));
        }
        if message.is_empty() {
            return Err(AppError::Validation("Message is required".to_string()));
        }
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(AppError::Validation(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }

        let now = Utc::now();
        let testimonial = Testimonial {
            id: Uuid::new_v4(),
            customer_name: customer_name.to_string(),
            message: message.to_string(),
            rating,
            is_approved: !self.require_approval,
            created_at: now,
            updated_at: now,
        };

        self.db.insert_testimonial(&testimonial).await?;
        tracing::info!(
            testimonial_id = %testimonial.id,
            rating,
            approved = testimonial.is_approved,
            "Testimonial submitted"
        );

        Ok(testimonial)
    }

    /// Show or hide a testimonial.
    pub async fn set_approval(
        &self,
        admin_id: Uuid,
        id: Uuid,
        approved: bool,
    ) -> Result<Testimonial> {
        let testimonial = self
            .db
            .set_testimonial_approval(id, approved, Utc::now())
            .await?
            .ok_or_else(|| AppError::NotFound("Testimonial not found".to_string()))?;

        tracing::info!(
            testimonial_id = %id,
            admin_id = %admin_id,
            approved,
            "Testimonial approval changed"
        );

        Ok(testimonial)
    }
}
