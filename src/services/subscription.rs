// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Customer subscriptions: creation, listing and status changes.

use crate::db::Store;
use crate::error::{AppError, Result};
use crate::models::subscription::{NewSubscription, StatusChange};
use crate::models::{Subscription, SubscriptionStatus};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

fn not_found() -> AppError {
    AppError::NotFound("Subscription not found".to_string())
}

fn validate_draft(draft: &NewSubscription) -> Result<()> {
    let required = [
        (draft.name.as_str(), "Name"),
        (draft.phone.as_str(), "Phone"),
        (draft.plan_name.as_str(), "Plan name"),
    ];
    for (value, field) in required {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{} is required", field)));
        }
    }
    if draft.plan_price < 1 {
        return Err(AppError::Validation(
            "Plan price must be a positive amount".to_string(),
        ));
    }
    if draft.meal_types.is_empty() {
        return Err(AppError::Validation(
            "At least one meal type is required".to_string(),
        ));
    }
    if draft.delivery_days.is_empty() {
        return Err(AppError::Validation(
            "At least one delivery day is required".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct SubscriptionService {
    db: Arc<dyn Store>,
}

impl SubscriptionService {
    pub fn new(db: Arc<dyn Store>) -> Self {
        Self { db }
    }

    /// Create an active subscription for `user_id`.
    ///
    /// The total is always computed here; `client_total` is only compared.
    pub async fn create(
        &self,
        user_id: Uuid,
        mut draft: NewSubscription,
        client_total: Option<i64>,
    ) -> Result<Subscription> {
        validate_draft(&draft)?;
        draft.name = draft.name.trim().to_string();
        draft.phone = draft.phone.trim().to_string();
        draft.plan_name = draft.plan_name.trim().to_string();
        draft.allergies = draft.allergies.trim().to_string();

        let subscription = Subscription::new(user_id, draft, Utc::now())
            .ok_or_else(|| AppError::Validation("Total price is out of range".to_string()))?;

        if let Some(claimed) = client_total {
            if claimed != subscription.total_price {
                tracing::warn!(
                    user_id = %user_id,
                    claimed,
                    computed = subscription.total_price,
                    "Client total price disagrees with server calculation"
                );
            }
        }

        self.db.insert_subscription(&subscription).await?;

        tracing::info!(
            subscription_id = %subscription.id,
            user_id = %user_id,
            plan = %subscription.plan_name,
            total_price = subscription.total_price,
            "Subscription created"
        );

        Ok(subscription)
    }

    /// The caller's subscriptions, newest first.
    pub async fn list_mine(&self, user_id: Uuid) -> Result<Vec<Subscription>> {
        let mut subscriptions = self.db.list_subscriptions_for_user(user_id).await?;
        subscriptions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(subscriptions)
    }

    /// One of the caller's subscriptions. Foreign records are reported as missing.
    pub async fn get_mine(&self, user_id: Uuid, id: Uuid) -> Result<Subscription> {
        self.db
            .get_subscription(id)
            .await?
            .filter(|s| s.user_id == user_id)
            .ok_or_else(not_found)
    }

    /// Pause, resume or cancel one of the caller's subscriptions.
    ///
    /// Ownership is checked before the request itself, so a foreign ID is a
    /// 404 even when the body is also invalid.
    pub async fn update_status(
        &self,
        user_id: Uuid,
        id: Uuid,
        status: SubscriptionStatus,
        paused_from: Option<NaiveDate>,
        paused_to: Option<NaiveDate>,
    ) -> Result<Subscription> {
        let mut subscription = self.get_mine(user_id, id).await?;
        let previous = subscription.status;

        let change = StatusChange::from_request(status, paused_from, paused_to)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        subscription
            .apply(change, Utc::now())
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.db.update_subscription(&subscription).await?;

        tracing::info!(
            subscription_id = %subscription.id,
            user_id = %user_id,
            from = %previous,
            to = %subscription.status,
            "Subscription status changed"
        );

        Ok(subscription)
    }
}
