// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Services module - business logic layer.

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod subscription;
pub mod testimonial;
pub mod users;

pub use admin::{AdminService, SubscriptionWithOwner, UserWithCount};
pub use auth::AuthService;
pub use catalog::CatalogService;
pub use subscription::SubscriptionService;
pub use testimonial::TestimonialService;
pub use users::UserService;
