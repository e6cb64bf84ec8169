// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Admin dashboard aggregates.
//!
//! Computed in one pass over the subscription list. Only
//! `new_subscriptions` honours the date range; revenue and active counts
//! always describe the current state of the book.

use crate::models::subscription::{Subscription, SubscriptionStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range from optional bounds.
    ///
    /// The range only applies when both bounds are given; a lone bound is
    /// ignored.
    pub fn from_bounds(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Option<Self>, String> {
        match (start, end) {
            (Some(start), Some(end)) if start <= end => Ok(Some(Self { start, end })),
            (Some(_), Some(_)) => Err("startDate must not be after endDate".to_string()),
            (None, None) => Ok(None),
            (start, end) => {
                tracing::debug!(?start, ?end, "Ignoring incomplete stats date range");
                Ok(None)
            }
        }
    }

    /// Whether a timestamp falls on a day inside the range.
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        let day = timestamp.date_naive();
        day >= self.start && day <= self.end
    }
}

/// Aggregates shown on the admin dashboard.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AdminStats {
    /// Subscriptions created within the range (all time without one)
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub new_subscriptions: u64,
    /// Sum of monthly prices over active subscriptions
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub monthly_revenue: i64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub active_subscriptions: u64,
    /// Active subscriptions that still carry a pause start date
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub reactivations: u64,
}

impl AdminStats {
    pub fn compute(subscriptions: &[Subscription], range: Option<&DateRange>) -> Self {
        let mut stats = AdminStats::default();

        for sub in subscriptions {
            if range.map_or(true, |r| r.contains(sub.created_at)) {
                stats.new_subscriptions += 1;
            }

            if sub.status == SubscriptionStatus::Active {
                stats.active_subscriptions += 1;
                stats.monthly_revenue = stats.monthly_revenue.saturating_add(sub.total_price);
                if sub.paused_from.is_some() {
                    stats.reactivations += 1;
                }
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::subscription::{DeliveryDay, MealType};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn make_subscription(
        status: SubscriptionStatus,
        total_price: i64,
        created_at: DateTime<Utc>,
    ) -> Subscription {
        Subscription {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Test".to_string(),
            phone: "0812345678".to_string(),
            plan_name: "Diet Plan".to_string(),
            plan_price: 30_000,
            meal_types: vec![MealType::Lunch],
            delivery_days: vec![DeliveryDay::Monday],
            allergies: String::new(),
            total_price,
            status,
            paused_from: None,
            paused_to: None,
            created_at,
            updated_at: created_at,
        }
    }

    fn ts(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_compute_without_range() {
        let subs = vec![
            make_subscription(SubscriptionStatus::Active, 100, ts(2025, 1, 5, 10)),
            make_subscription(SubscriptionStatus::Paused, 200, ts(2025, 1, 6, 10)),
            make_subscription(SubscriptionStatus::Cancelled, 400, ts(2025, 2, 1, 10)),
            make_subscription(SubscriptionStatus::Active, 800, ts(2025, 3, 1, 10)),
        ];

        let stats = AdminStats::compute(&subs, None);

        assert_eq!(stats.new_subscriptions, 4);
        assert_eq!(stats.active_subscriptions, 2);
        assert_eq!(stats.monthly_revenue, 900);
        assert_eq!(stats.reactivations, 0);
    }

    #[test]
    fn test_range_only_scopes_new_subscriptions() {
        let subs = vec![
            make_subscription(SubscriptionStatus::Active, 100, ts(2025, 1, 5, 10)),
            make_subscription(SubscriptionStatus::Active, 200, ts(2025, 1, 31, 23)),
            make_subscription(SubscriptionStatus::Active, 400, ts(2025, 2, 1, 0)),
        ];
        let range = DateRange::from_bounds(Some(day(2025, 1, 1)), Some(day(2025, 1, 31)))
            .unwrap()
            .unwrap();

        let stats = AdminStats::compute(&subs, Some(&range));

        // The last hour of the end date is still inside the range
        assert_eq!(stats.new_subscriptions, 2);
        assert_eq!(stats.active_subscriptions, 3);
        assert_eq!(stats.monthly_revenue, 700);
    }

    #[test]
    fn test_reactivations_count_active_with_pause_start() {
        let mut sub = make_subscription(SubscriptionStatus::Active, 100, ts(2025, 1, 5, 10));
        sub.paused_from = Some(day(2025, 1, 10));
        let mut paused = make_subscription(SubscriptionStatus::Paused, 100, ts(2025, 1, 5, 10));
        paused.paused_from = Some(day(2025, 1, 10));

        let stats = AdminStats::compute(&[sub, paused], None);
        assert_eq!(stats.reactivations, 1);
    }

    #[test]
    fn test_range_bounds_validation() {
        assert_eq!(DateRange::from_bounds(None, None), Ok(None));
        assert_eq!(DateRange::from_bounds(Some(day(2025, 1, 1)), None), Ok(None));
        assert_eq!(DateRange::from_bounds(None, Some(day(2025, 1, 1))), Ok(None));
        assert!(DateRange::from_bounds(Some(day(2025, 2, 1)), Some(day(2025, 1, 1))).is_err());
    }
}
