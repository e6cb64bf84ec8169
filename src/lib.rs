// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! SEA Catering: meal subscription backend
//!
//! This crate provides the HTTP API for the meal plan catalog, customer
//! subscriptions, testimonials and the admin dashboard.

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Store;
use services::{
    AdminService, AuthService, CatalogService, SubscriptionService, TestimonialService,
    UserService,
};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Arc<dyn Store>,
    pub auth: AuthService,
    pub users: UserService,
    pub catalog: CatalogService,
    pub subscriptions: SubscriptionService,
    pub testimonials: TestimonialService,
    pub admin: AdminService,
}

impl AppState {
    /// Wire every service to the same store.
    pub fn new(config: Config, db: Arc<dyn Store>) -> Self {
        Self {
            auth: AuthService::new(db.clone(), config.jwt_signing_key.clone()),
            users: UserService::new(db.clone()),
            catalog: CatalogService::new(db.clone()),
            subscriptions: SubscriptionService::new(db.clone()),
            testimonials: TestimonialService::new(
                db.clone(),
                config.testimonials_require_approval,
            ),
            admin: AdminService::new(db.clone()),
            db,
            config,
        }
    }
}
