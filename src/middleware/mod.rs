// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Middleware modules (authentication, security headers, error detail).

pub mod auth;
pub mod error_detail;
pub mod security;

pub use auth::{require_admin, require_auth, AuthUser};
