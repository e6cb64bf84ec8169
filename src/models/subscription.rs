// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Subscription model, pricing and status lifecycle.
//!
//! A subscription starts `active`. It can move between `active` and `paused`
//! (pausing needs a date window) and can be cancelled from either state.
//! Cancellation is terminal.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;

/// Average number of weeks in a month, in tenths (4.3 weeks).
pub const WEEKS_PER_MONTH_TENTHS: i64 = 43;

/// Subscription lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum SubscriptionStatus {
    Active,
    Paused,
    Cancelled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Paused => "paused",
            SubscriptionStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(SubscriptionStatus::Active),
            "paused" => Ok(SubscriptionStatus::Paused),
            "cancelled" => Ok(SubscriptionStatus::Cancelled),
            other => Err(format!("Unknown subscription status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum DeliveryDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Monthly price for a plan price, number of meal types and number of delivery days.
///
/// `price × meals × days × 4.3`, rounded half-up to the smallest currency unit.
/// Returns `None` on overflow.
pub fn monthly_price(plan_price: i64, meal_count: usize, day_count: usize) -> Option<i64> {
    let tenths = plan_price
        .checked_mul(i64::try_from(meal_count).ok()?)?
        .checked_mul(i64::try_from(day_count).ok()?)?
        .checked_mul(WEEKS_PER_MONTH_TENTHS)?;
    Some(tenths.checked_add(5)?.div_euclid(10))
}

/// Sort and deduplicate a selection so it behaves as a set.
pub fn normalize_selection<T: Ord>(mut items: Vec<T>) -> Vec<T> {
    items.sort();
    items.dedup();
    items
}

/// Stored subscription record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    /// Subscription ID (also used as document ID)
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Customer name on the order
    pub name: String,
    pub phone: String,
    pub plan_name: String,
    /// Plan price at the time of subscribing
    pub plan_price: i64,
    pub meal_types: Vec<MealType>,
    pub delivery_days: Vec<DeliveryDay>,
    #[serde(default)]
    pub allergies: String,
    pub total_price: i64,
    pub status: SubscriptionStatus,
    pub paused_from: Option<NaiveDate>,
    pub paused_to: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied by the customer when subscribing.
#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub name: String,
    pub phone: String,
    pub plan_name: String,
    pub plan_price: i64,
    pub meal_types: Vec<MealType>,
    pub delivery_days: Vec<DeliveryDay>,
    pub allergies: String,
}

impl Subscription {
    /// Build a new active subscription, pricing it from its own selections.
    ///
    /// Returns `None` if the monthly price overflows.
    pub fn new(user_id: Uuid, draft: NewSubscription, now: DateTime<Utc>) -> Option<Self> {
        let meal_types = normalize_selection(draft.meal_types);
        let delivery_days = normalize_selection(draft.delivery_days);
        let total_price = monthly_price(draft.plan_price, meal_types.len(), delivery_days.len())?;

        Some(Self {
            id: Uuid::new_v4(),
            user_id,
            name: draft.name,
            phone: draft.phone,
            plan_name: draft.plan_name,
            plan_price: draft.plan_price,
            meal_types,
            delivery_days,
            allergies: draft.allergies,
            total_price,
            status: SubscriptionStatus::Active,
            paused_from: None,
            paused_to: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a status change, enforcing the lifecycle rules.
    ///
    /// On error the record is left untouched.
    pub fn apply(&mut self, change: StatusChange, now: DateTime<Utc>) -> Result<(), TransitionError> {
        if self.status == SubscriptionStatus::Cancelled {
            return Err(TransitionError::Terminal);
        }

        match change {
            StatusChange::Activate => {
                self.status = SubscriptionStatus::Active;
                self.paused_from = None;
                self.paused_to = None;
            }
            StatusChange::Pause { from, to } => {
                self.status = SubscriptionStatus::Paused;
                self.paused_from = Some(from);
                self.paused_to = Some(to);
            }
            StatusChange::Cancel => {
                self.status = SubscriptionStatus::Cancelled;
                self.paused_from = None;
                self.paused_to = None;
            }
        }

        self.updated_at = now;
        Ok(())
    }
}

/// A validated status change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    Activate,
    Pause { from: NaiveDate, to: NaiveDate },
    Cancel,
}

impl StatusChange {
    /// Build a change from the loose request shape.
    ///
    /// Dates are ignored unless the target status is `paused`.
    pub fn from_request(
        status: SubscriptionStatus,
        paused_from: Option<NaiveDate>,
        paused_to: Option<NaiveDate>,
    ) -> Result<Self, TransitionError> {
        match status {
            SubscriptionStatus::Active => Ok(StatusChange::Activate),
            SubscriptionStatus::Cancelled => Ok(StatusChange::Cancel),
            SubscriptionStatus::Paused => match (paused_from, paused_to) {
                (Some(from), Some(to)) if from <= to => Ok(StatusChange::Pause { from, to }),
                (Some(_), Some(_)) => Err(TransitionError::InvertedPauseWindow),
                _ => Err(TransitionError::MissingPauseWindow),
            },
        }
    }

    pub fn target(&self) -> SubscriptionStatus {
        match self {
            StatusChange::Activate => SubscriptionStatus::Active,
            StatusChange::Pause { .. } => SubscriptionStatus::Paused,
            StatusChange::Cancel => SubscriptionStatus::Cancelled,
        }
    }
}

/// Rejected status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("Cancelled subscriptions cannot be changed")]
    Terminal,

    #[error("pausedFrom and pausedTo are required to pause a subscription")]
    MissingPauseWindow,

    #[error("pausedFrom must not be after pausedTo")]
    InvertedPauseWindow,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn draft(plan_price: i64, meals: Vec<MealType>, days: Vec<DeliveryDay>) -> NewSubscription {
        NewSubscription {
            name: "Budi".to_string(),
            phone: "08123456789".to_string(),
            plan_name: "Protein Plan".to_string(),
            plan_price,
            meal_types: meals,
            delivery_days: days,
            allergies: String::new(),
        }
    }

    fn weekdays() -> Vec<DeliveryDay> {
        vec![
            DeliveryDay::Monday,
            DeliveryDay::Tuesday,
            DeliveryDay::Wednesday,
            DeliveryDay::Thursday,
            DeliveryDay::Friday,
        ]
    }

    #[test]
    fn test_monthly_price_examples() {
        assert_eq!(monthly_price(30_000, 2, 5), Some(1_290_000));
        assert_eq!(monthly_price(40_000, 2, 5), Some(1_720_000));
        assert_eq!(monthly_price(60_000, 3, 7), Some(5_418_000));
        assert_eq!(monthly_price(30_000, 1, 1), Some(129_000));
    }

    #[test]
    fn test_monthly_price_matches_formula_for_all_counts() {
        for meals in 1..=3usize {
            for days in 1..=7usize {
                let expected = 30_000 * meals as i64 * days as i64 * 43 / 10;
                assert_eq!(monthly_price(30_000, meals, days), Some(expected));
            }
        }
    }

    #[test]
    fn test_monthly_price_rounds_half_up() {
        // 1 × 1 × 1 × 4.3 = 4.3 -> 4; 5 × 4.3 = 21.5 -> 22
        assert_eq!(monthly_price(1, 1, 1), Some(4));
        assert_eq!(monthly_price(5, 1, 1), Some(22));
    }

    #[test]
    fn test_monthly_price_overflow() {
        assert_eq!(monthly_price(i64::MAX, 3, 7), None);
    }

    #[test]
    fn test_new_subscription_dedups_selections() {
        let sub = Subscription::new(
            Uuid::new_v4(),
            draft(
                40_000,
                vec![MealType::Dinner, MealType::Breakfast, MealType::Dinner],
                weekdays(),
            ),
            Utc::now(),
        )
        .unwrap();

        assert_eq!(sub.meal_types, vec![MealType::Breakfast, MealType::Dinner]);
        assert_eq!(sub.total_price, 1_720_000);
        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert!(sub.paused_from.is_none());
    }

    #[test]
    fn test_pause_then_activate_clears_window() {
        let mut sub = Subscription::new(
            Uuid::new_v4(),
            draft(30_000, vec![MealType::Lunch], weekdays()),
            Utc::now(),
        )
        .unwrap();

        let pause = StatusChange::from_request(
            SubscriptionStatus::Paused,
            Some(date("2025-02-01")),
            Some(date("2025-02-10")),
        )
        .unwrap();
        sub.apply(pause, Utc::now()).unwrap();
        assert_eq!(sub.status, SubscriptionStatus::Paused);
        assert_eq!(sub.paused_from, Some(date("2025-02-01")));
        assert_eq!(sub.paused_to, Some(date("2025-02-10")));

        sub.apply(StatusChange::Activate, Utc::now()).unwrap();
        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert!(sub.paused_from.is_none());
        assert!(sub.paused_to.is_none());
    }

    #[test]
    fn test_pause_requires_both_dates() {
        let err = StatusChange::from_request(
            SubscriptionStatus::Paused,
            Some(date("2025-02-01")),
            None,
        )
        .unwrap_err();
        assert_eq!(err, TransitionError::MissingPauseWindow);

        let err =
            StatusChange::from_request(SubscriptionStatus::Paused, None, None).unwrap_err();
        assert_eq!(err, TransitionError::MissingPauseWindow);
    }

    #[test]
    fn test_pause_rejects_inverted_window() {
        let err = StatusChange::from_request(
            SubscriptionStatus::Paused,
            Some(date("2025-02-10")),
            Some(date("2025-02-01")),
        )
        .unwrap_err();
        assert_eq!(err, TransitionError::InvertedPauseWindow);
    }

    #[test]
    fn test_single_day_pause_allowed() {
        let change = StatusChange::from_request(
            SubscriptionStatus::Paused,
            Some(date("2025-02-01")),
            Some(date("2025-02-01")),
        )
        .unwrap();
        assert_eq!(change.target(), SubscriptionStatus::Paused);
    }

    #[test]
    fn test_cancelled_is_terminal() {
        let mut sub = Subscription::new(
            Uuid::new_v4(),
            draft(30_000, vec![MealType::Lunch], weekdays()),
            Utc::now(),
        )
        .unwrap();

        sub.apply(StatusChange::Cancel, Utc::now()).unwrap();
        let before = sub.updated_at;

        assert_eq!(
            sub.apply(StatusChange::Activate, Utc::now()),
            Err(TransitionError::Terminal)
        );
        assert_eq!(sub.status, SubscriptionStatus::Cancelled);
        assert_eq!(sub.updated_at, before);
    }

    #[test]
    fn test_cancel_from_paused_clears_window() {
        let mut sub = Subscription::new(
            Uuid::new_v4(),
            draft(30_000, vec![MealType::Lunch], weekdays()),
            Utc::now(),
        )
        .unwrap();
        sub.apply(
            StatusChange::Pause {
                from: date("2025-02-01"),
                to: date("2025-02-03"),
            },
            Utc::now(),
        )
        .unwrap();

        sub.apply(StatusChange::Cancel, Utc::now()).unwrap();
        assert_eq!(sub.status, SubscriptionStatus::Cancelled);
        assert!(sub.paused_from.is_none());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "paused".parse::<SubscriptionStatus>().unwrap(),
            SubscriptionStatus::Paused
        );
        assert!("Paused".parse::<SubscriptionStatus>().is_err());
    }
}
