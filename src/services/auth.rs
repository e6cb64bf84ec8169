// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Account registration, login and session verification.

use crate::config::AdminBootstrap;
use crate::db::Store;
use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, decode_jwt, AuthUser};
use crate::models::User;
use anyhow::{anyhow, Context};
use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::ValidateEmail;

/// Verified against when the email is unknown, so both login failures cost the same.
const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$gZiV/M1gPc22ElAH/Jh1Hw$CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

/// Hash a password into an Argon2id PHC string with a fresh salt.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow!("Failed to hash password: {}", e))
}

/// Check a password against a stored PHC string.
///
/// A malformed stored hash counts as a mismatch.
pub fn verify_password(password: &str, phc: &str) -> bool {
    match PasswordHash::new(phc) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash is not a valid PHC string");
            false
        }
    }
}

/// Argon2 is deliberately slow; keep it off the async workers.
async fn hash_password_blocking(password: String) -> Result<String> {
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .context("Password hashing task failed")??;
    Ok(hash)
}

async fn verify_password_blocking(password: String, phc: String) -> Result<bool> {
    let ok = tokio::task::spawn_blocking(move || verify_password(&password, &phc))
        .await
        .context("Password verification task failed")?;
    Ok(ok)
}

fn require_non_empty(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Authentication service.
#[derive(Clone)]
pub struct AuthService {
    db: Arc<dyn Store>,
    signing_key: Vec<u8>,
}

impl AuthService {
    pub fn new(db: Arc<dyn Store>, signing_key: Vec<u8>) -> Self {
        Self { db, signing_key }
    }

    /// Register a customer account.
    pub async fn register(&self, full_name: &str, email: &str, password: &str) -> Result<User> {
        let user = self.create_user(full_name, email, password, false).await?;
        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Create an account with the given role.
    pub async fn create_user(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
        is_admin: bool,
    ) -> Result<User> {
        require_non_empty(full_name, "Full name")?;
        require_non_empty(email, "Email")?;
        if password.is_empty() {
            return Err(AppError::Validation("Password is required".to_string()));
        }

        let email = User::normalize_email(email);
        if !email.validate_email() {
            return Err(AppError::Validation(
                "Email must be a valid email address".to_string(),
            ));
        }

        // Cheap pre-check; the store's insert is the authoritative one
        if self.db.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let password_hash = hash_password_blocking(password.to_string()).await?;
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            full_name: full_name.trim().to_string(),
            email,
            password_hash,
            is_admin,
            created_at: now,
            updated_at: now,
        };

        self.db.insert_user(&user).await?;
        Ok(user)
    }

    /// Verify credentials and issue a session token.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User)> {
        require_non_empty(email, "Email")?;
        if password.is_empty() {
            return Err(AppError::Validation("Password is required".to_string()));
        }

        let email = User::normalize_email(email);
        let user = self.db.find_user_by_email(&email).await?;

        let phc = user
            .as_ref()
            .map(|u| u.password_hash.clone())
            .unwrap_or_else(|| DUMMY_PASSWORD_HASH.to_string());
        let password_ok = verify_password_blocking(password.to_string(), phc).await?;

        let user = match user {
            Some(user) if password_ok => user,
            _ => {
                tracing::info!("Login failed");
                return Err(AppError::InvalidCredentials);
            }
        };

        let token = create_jwt(user.id, &user.email, &self.signing_key)?;
        tracing::info!(user_id = %user.id, "User logged in");

        Ok((token, user))
    }

    /// Resolve a bearer token to the current user record.
    pub async fn authenticate(&self, token: &str) -> Result<AuthUser> {
        let user_id = decode_jwt(token, &self.signing_key)?;

        let user = self.db.get_user(user_id).await?.ok_or_else(|| {
            tracing::debug!(user_id = %user_id, "Token names a user that no longer exists");
            AppError::InvalidToken
        })?;

        Ok(AuthUser {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            is_admin: user.is_admin,
        })
    }

    /// Create the configured admin account unless the email is already taken.
    pub async fn bootstrap_admin(&self, admin: &AdminBootstrap) -> Result<()> {
        let email = User::normalize_email(&admin.email);

        if let Some(existing) = self.db.find_user_by_email(&email).await? {
            if !existing.is_admin {
                tracing::warn!(
                    user_id = %existing.id,
                    "Admin bootstrap email belongs to a non-admin account, leaving it unchanged"
                );
            }
            return Ok(());
        }

        match self
            .create_user(&admin.full_name, &email, &admin.password, true)
            .await
        {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "Admin account created");
                Ok(())
            }
            // Another instance won the race
            Err(AppError::Conflict(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }
}
