// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Data models for the application.

pub mod meal_plan;
pub mod pagination;
pub mod stats;
pub mod subscription;
pub mod testimonial;
pub mod user;

pub use meal_plan::MealPlan;
pub use pagination::{PageParams, Pagination};
pub use stats::{AdminStats, DateRange};
pub use subscription::{DeliveryDay, MealType, StatusChange, Subscription, SubscriptionStatus};
pub use testimonial::Testimonial;
pub use user::User;
