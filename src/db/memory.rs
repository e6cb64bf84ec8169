// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! In-process store backed by concurrent maps.

use crate::db::Store;
use crate::error::AppError;
use crate::models::{MealPlan, Subscription, SubscriptionStatus, Testimonial, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

/// Store that keeps everything in memory. Cloning shares the same data.
#[derive(Clone, Default)]
pub struct MemoryDb {
    inner: std::sync::Arc<Tables>,
}

#[derive(Default)]
struct Tables {
    users: DashMap<Uuid, User>,
    /// Lowercase email -> user ID
    user_emails: DashMap<String, Uuid>,
    meal_plans: DashMap<Uuid, MealPlan>,
    subscriptions: DashMap<Uuid, Subscription>,
    testimonials: DashMap<Uuid, Testimonial>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryDb {
    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        // Claim the email first so concurrent registrations cannot both win
        match self.inner.user_emails.entry(user.email.clone()) {
            Entry::Occupied(_) => {
                return Err(AppError::Conflict("User already exists".to_string()));
            }
            Entry::Vacant(slot) => {
                slot.insert(user.id);
            }
        }
        self.inner.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.inner.users.get(&id).map(|u| u.clone()))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let Some(id) = self.inner.user_emails.get(email).map(|id| *id) else {
            return Ok(None);
        };
        self.get_user(id).await
    }

    async fn update_user(&self, user: &User) -> Result<(), AppError> {
        match self.inner.users.get_mut(&user.id) {
            Some(mut existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(AppError::NotFound("User not found".to_string())),
        }
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.inner.users.iter().map(|u| u.value().clone()).collect())
    }

    async fn upsert_meal_plan(&self, plan: &MealPlan) -> Result<(), AppError> {
        self.inner.meal_plans.insert(plan.id, plan.clone());
        Ok(())
    }

    async fn get_meal_plan(&self, id: Uuid) -> Result<Option<MealPlan>, AppError> {
        Ok(self.inner.meal_plans.get(&id).map(|p| p.clone()))
    }

    async fn list_active_meal_plans(&self) -> Result<Vec<MealPlan>, AppError> {
        Ok(self
            .inner
            .meal_plans
            .iter()
            .filter(|p| p.is_active)
            .map(|p| p.value().clone())
            .collect())
    }

    async fn insert_subscription(&self, subscription: &Subscription) -> Result<(), AppError> {
        self.inner
            .subscriptions
            .insert(subscription.id, subscription.clone());
        Ok(())
    }

    async fn get_subscription(&self, id: Uuid) -> Result<Option<Subscription>, AppError> {
        Ok(self.inner.subscriptions.get(&id).map(|s| s.clone()))
    }

    async fn update_subscription(&self, subscription: &Subscription) -> Result<(), AppError> {
        match self.inner.subscriptions.get_mut(&subscription.id) {
            Some(mut existing) => {
                *existing = subscription.clone();
                Ok(())
            }
            None => Err(AppError::NotFound("Subscription not found".to_string())),
        }
    }

    async fn list_subscriptions_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Subscription>, AppError> {
        Ok(self
            .inner
            .subscriptions
            .iter()
            .filter(|s| s.user_id == user_id)
            .map(|s| s.value().clone())
            .collect())
    }

    async fn list_subscriptions(
        &self,
        status: Option<SubscriptionStatus>,
    ) -> Result<Vec<Subscription>, AppError> {
        Ok(self
            .inner
            .subscriptions
            .iter()
            .filter(|s| status.map_or(true, |wanted| s.status == wanted))
            .map(|s| s.value().clone())
            .collect())
    }

    async fn insert_testimonial(&self, testimonial: &Testimonial) -> Result<(), AppError> {
        self.inner
            .testimonials
            .insert(testimonial.id, testimonial.clone());
        Ok(())
    }

    async fn list_testimonials(&self, approved_only: bool) -> Result<Vec<Testimonial>, AppError> {
        Ok(self
            .inner
            .testimonials
            .iter()
            .filter(|t| !approved_only || t.is_approved)
            .map(|t| t.value().clone())
            .collect())
    }

    async fn set_testimonial_approval(
        &self,
        id: Uuid,
        approved: bool,
        now: DateTime<Utc>,
    ) -> Result<Option<Testimonial>, AppError> {
        Ok(self.inner.testimonials.get_mut(&id).map(|mut t| {
            t.is_approved = approved;
            t.updated_at = now;
            t.clone()
        }))
    }
}
