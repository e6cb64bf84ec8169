// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Admin dashboard reads.

use crate::db::Store;
use crate::error::Result;
use crate::models::{
    AdminStats, DateRange, PageParams, Pagination, Subscription, SubscriptionStatus, User,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// A subscription joined with its owner's contact details.
#[derive(Debug, Clone)]
pub struct SubscriptionWithOwner {
    pub subscription: Subscription,
    /// `None` if the owner record is gone
    pub owner: Option<User>,
}

/// A customer with the number of subscriptions they hold.
#[derive(Debug, Clone)]
pub struct UserWithCount {
    pub user: User,
    pub subscription_count: u64,
}

#[derive(Clone)]
pub struct AdminService {
    db: Arc<dyn Store>,
}

impl AdminService {
    pub fn new(db: Arc<dyn Store>) -> Self {
        Self { db }
    }

    /// Dashboard aggregates; `range` scopes only the new-subscription count.
    pub async fn stats(&self, range: Option<DateRange>) -> Result<AdminStats> {
        let subscriptions = self.db.list_subscriptions(None).await?;
        let stats = AdminStats::compute(&subscriptions, range.as_ref());

        tracing::debug!(
            total = subscriptions.len(),
            new = stats.new_subscriptions,
            active = stats.active_subscriptions,
            "Computed admin stats"
        );

        Ok(stats)
    }

    /// All subscriptions, newest first, optionally filtered by status.
    pub async fn list_subscriptions(
        &self,
        params: PageParams,
        status: Option<SubscriptionStatus>,
    ) -> Result<(Vec<SubscriptionWithOwner>, Pagination)> {
        let mut subscriptions = self.db.list_subscriptions(status).await?;
        subscriptions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let (page, pagination) = params.paginate(subscriptions);

        let mut owners: HashMap<Uuid, Option<User>> = HashMap::new();
        let mut rows = Vec::with_capacity(page.len());
        for subscription in page {
            let owner = match owners.get(&subscription.user_id).cloned() {
                Some(cached) => cached,
                None => {
                    let fetched = self.db.get_user(subscription.user_id).await?;
                    owners.insert(subscription.user_id, fetched.clone());
                    fetched
                }
            };
            rows.push(SubscriptionWithOwner {
                subscription,
                owner,
            });
        }

        Ok((rows, pagination))
    }

    /// Non-admin users, newest first, with their subscription counts.
    pub async fn list_users(
        &self,
        params: PageParams,
    ) -> Result<(Vec<UserWithCount>, Pagination)> {
        let mut users: Vec<User> = self
            .db
            .list_users()
            .await?
            .into_iter()
            .filter(|u| !u.is_admin)
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let (page, pagination) = params.paginate(users);

        let mut counts: HashMap<Uuid, u64> = HashMap::new();
        for subscription in self.db.list_subscriptions(None).await? {
            *counts.entry(subscription.user_id).or_default() += 1;
        }

        let rows = page
            .into_iter()
            .map(|user| UserWithCount {
                subscription_count: counts.get(&user.id).copied().unwrap_or(0),
                user,
            })
            .collect();

        Ok((rows, pagination))
    }
}
