// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Database layer.
//!
//! Services talk to a [`Store`]; Firestore is the deployed backend and
//! [`MemoryDb`] backs tests and local runs.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::error::AppError;
use crate::models::{MealPlan, Subscription, SubscriptionStatus, Testimonial, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    /// Email uniqueness index (document ID = lowercase email)
    pub const USER_EMAILS: &str = "user_emails";
    pub const MEAL_PLANS: &str = "meal_plans";
    pub const SUBSCRIPTIONS: &str = "subscriptions";
    pub const TESTIMONIALS: &str = "testimonials";
}

/// Entity operations used by the services.
///
/// Listing methods return records in no particular order; callers sort.
#[async_trait]
pub trait Store: Send + Sync {
    // ─── Users ───────────────────────────────────────────────────

    /// Insert a new user. Fails with `AppError::Conflict` if the email is taken.
    async fn insert_user(&self, user: &User) -> Result<(), AppError>;

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Look up a user by already-normalized email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Overwrite an existing user record (email is not changed through here).
    async fn update_user(&self, user: &User) -> Result<(), AppError>;

    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    // ─── Meal Plans ──────────────────────────────────────────────

    async fn upsert_meal_plan(&self, plan: &MealPlan) -> Result<(), AppError>;

    async fn get_meal_plan(&self, id: Uuid) -> Result<Option<MealPlan>, AppError>;

    async fn list_active_meal_plans(&self) -> Result<Vec<MealPlan>, AppError>;

    // ─── Subscriptions ───────────────────────────────────────────

    async fn insert_subscription(&self, subscription: &Subscription) -> Result<(), AppError>;

    async fn get_subscription(&self, id: Uuid) -> Result<Option<Subscription>, AppError>;

    async fn update_subscription(&self, subscription: &Subscription) -> Result<(), AppError>;

    async fn list_subscriptions_for_user(&self, user_id: Uuid)
        -> Result<Vec<Subscription>, AppError>;

    /// All subscriptions, optionally restricted to one status.
    async fn list_subscriptions(
        &self,
        status: Option<SubscriptionStatus>,
    ) -> Result<Vec<Subscription>, AppError>;

    // ─── Testimonials ────────────────────────────────────────────

    async fn insert_testimonial(&self, testimonial: &Testimonial) -> Result<(), AppError>;

    async fn list_testimonials(&self, approved_only: bool) -> Result<Vec<Testimonial>, AppError>;

    /// Set the approval flag. Returns `None` if the testimonial does not exist.
    async fn set_testimonial_approval(
        &self,
        id: Uuid,
        approved: bool,
        now: DateTime<Utc>,
    ) -> Result<Option<Testimonial>, AppError>;
}
