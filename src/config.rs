// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Application configuration loaded from environment variables.

use std::env;

/// Which `Store` implementation backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Google Cloud Firestore (or its emulator).
    Firestore,
    /// In-process maps; data is lost on restart.
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(StorageBackend::Firestore),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(ConfigError::Invalid("STORAGE_BACKEND", s.to_string())),
        }
    }
}

/// Credentials for the admin account created at startup.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Production mode hides internal error details
    pub production: bool,
    /// Persistence backend
    pub storage: StorageBackend,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// New testimonials start unapproved when set
    pub testimonials_require_approval: bool,
    /// Admin account to create at startup, if any
    pub admin_bootstrap: Option<AdminBootstrap>,
}

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            production: false,
            storage: StorageBackend::Memory,
            gcp_project_id: "test-project".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            testimonials_require_approval: false,
            admin_bootstrap: None,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let storage = env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "firestore".to_string())
            .parse()?;

        let admin_bootstrap = match (env::var("ADMIN_EMAIL"), env::var("ADMIN_PASSWORD")) {
            (Ok(email), Ok(password)) if !email.trim().is_empty() && !password.is_empty() => {
                Some(AdminBootstrap {
                    full_name: env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrator".to_string()),
                    email: email.trim().to_string(),
                    password,
                })
            }
            _ => None,
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            production: env::var("APP_ENV")
                .map(|v| v.trim().eq_ignore_ascii_case("production"))
                .unwrap_or(false),
            storage,
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            testimonials_require_approval: parse_flag(
                env::var("TESTIMONIALS_REQUIRE_APPROVAL").ok().as_deref(),
            ),
            admin_bootstrap,
        })
    }
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
