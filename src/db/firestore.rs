// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Firestore client wrapper with typed operations.
//!
//! Provides the [`Store`] operations for:
//! - Users (profiles plus an email index for uniqueness)
//! - Meal plans (catalog)
//! - Subscriptions
//! - Testimonials

use crate::db::{collections, Store};
use crate::error::AppError;
use crate::models::{MealPlan, Subscription, SubscriptionStatus, Testimonial, User};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Document in the `user_emails` index collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserEmailIndex {
    user_id: Uuid,
}

/// Document ID of an email's index entry. Firestore IDs may not contain `/`.
pub fn email_doc_id(email: &str) -> String {
    urlencoding::encode(email).into_owned()
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: firestore::FirestoreDb,
}

impl FirestoreDb {
    /// The underlying client.
    pub fn client(&self) -> &firestore::FirestoreDb {
        &self.client
    }

    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self { client })
    }

    /// Fetch one document by ID.
    async fn get_by_id<T>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError>
    where
        T: for<'de> Deserialize<'de> + Send,
    {
        self.client
            .fluent()
            .select()
            .by_id_in(collection)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or overwrite one document.
    async fn put<T>(&self, collection: &str, id: &str, object: &T) -> Result<(), AppError>
    where
        T: Serialize + for<'de> Deserialize<'de> + Sync + Send,
    {
        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(collection)
            .document_id(id)
            .object(object)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Read every document in a collection.
    async fn list_all<T>(&self, collection: &str) -> Result<Vec<T>, AppError>
    where
        T: for<'de> Deserialize<'de> + Send,
    {
        self.client
            .fluent()
            .select()
            .from(collection)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[async_trait]
impl Store for FirestoreDb {
    // ─── User Operations ─────────────────────────────────────────

    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let index_id = email_doc_id(&user.email);
        let index = UserEmailIndex { user_id: user.id };

        // `insert` fails if the document exists, which makes the index the
        // uniqueness check.
        let claimed: Result<(), firestore::errors::FirestoreError> = self
            .client
            .fluent()
            .insert()
            .into(collections::USER_EMAILS)
            .document_id(&index_id)
            .object(&index)
            .execute()
            .await;

        match claimed {
            Ok(()) => {}
            Err(firestore::errors::FirestoreError::DataConflictError(_)) => {
                let existing: Option<UserEmailIndex> =
                    self.get_by_id(collections::USER_EMAILS, &index_id).await?;
                let owner = match existing {
                    Some(existing) => self.get_user(existing.user_id).await?,
                    None => None,
                };
                if owner.is_some() {
                    return Err(AppError::Conflict("User already exists".to_string()));
                }
                // Left behind by a registration whose user write failed
                tracing::warn!(user_id = %user.id, "Reclaiming orphaned email index entry");
                self.put(collections::USER_EMAILS, &index_id, &index)
                    .await?;
            }
            Err(e) => return Err(AppError::Database(e.to_string())),
        }

        if let Err(e) = self
            .put(collections::USERS, &user.id.to_string(), user)
            .await
        {
            let released = self
                .client
                .fluent()
                .delete()
                .from(collections::USER_EMAILS)
                .document_id(&index_id)
                .execute()
                .await;
            if let Err(release_err) = released {
                tracing::error!(
                    user_id = %user.id,
                    error = %release_err,
                    "Failed to release email index after user write failed"
                );
            }
            return Err(e);
        }

        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        self.get_by_id(collections::USERS, &id.to_string()).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let index: Option<UserEmailIndex> = self
            .get_by_id(collections::USER_EMAILS, &email_doc_id(email))
            .await?;

        match index {
            Some(index) => self.get_user(index.user_id).await,
            None => Ok(None),
        }
    }

    async fn update_user(&self, user: &User) -> Result<(), AppError> {
        self.put(collections::USERS, &user.id.to_string(), user)
            .await
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.list_all(collections::USERS).await
    }

    // ─── Meal Plan Operations ────────────────────────────────────

    async fn upsert_meal_plan(&self, plan: &MealPlan) -> Result<(), AppError> {
        self.put(collections::MEAL_PLANS, &plan.id.to_string(), plan)
            .await
    }

    async fn get_meal_plan(&self, id: Uuid) -> Result<Option<MealPlan>, AppError> {
        self.get_by_id(collections::MEAL_PLANS, &id.to_string())
            .await
    }

    async fn list_active_meal_plans(&self) -> Result<Vec<MealPlan>, AppError> {
        self.client
            .fluent()
            .select()
            .from(collections::MEAL_PLANS)
            .filter(|q| q.for_all([q.field("is_active").eq(true)]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Subscription Operations ─────────────────────────────────

    async fn insert_subscription(&self, subscription: &Subscription) -> Result<(), AppError> {
        self.put(
            collections::SUBSCRIPTIONS,
            &subscription.id.to_string(),
            subscription,
        )
        .await
    }

    async fn get_subscription(&self, id: Uuid) -> Result<Option<Subscription>, AppError> {
        self.get_by_id(collections::SUBSCRIPTIONS, &id.to_string())
            .await
    }

    async fn update_subscription(&self, subscription: &Subscription) -> Result<(), AppError> {
        self.put(
            collections::SUBSCRIPTIONS,
            &subscription.id.to_string(),
            subscription,
        )
        .await
    }

    async fn list_subscriptions_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Subscription>, AppError> {
        let user_id = user_id.to_string();
        self.client
            .fluent()
            .select()
            .from(collections::SUBSCRIPTIONS)
            .filter(move |q| q.for_all([q.field("user_id").eq(user_id.clone())]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn list_subscriptions(
        &self,
        status: Option<SubscriptionStatus>,
    ) -> Result<Vec<Subscription>, AppError> {
        let Some(status) = status else {
            return self.list_all(collections::SUBSCRIPTIONS).await;
        };

        self.client
            .fluent()
            .select()
            .from(collections::SUBSCRIPTIONS)
            .filter(move |q| q.for_all([q.field("status").eq(status.as_str())]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Testimonial Operations ──────────────────────────────────

    async fn insert_testimonial(&self, testimonial: &Testimonial) -> Result<(), AppError> {
        self.put(
            collections::TESTIMONIALS,
            &testimonial.id.to_string(),
            testimonial,
        )
        .await
    }

    async fn list_testimonials(&self, approved_only: bool) -> Result<Vec<Testimonial>, AppError> {
        if !approved_only {
            return self.list_all(collections::TESTIMONIALS).await;
        }

        self.client
            .fluent()
            .select()
            .from(collections::TESTIMONIALS)
            .filter(|q| q.for_all([q.field("is_approved").eq(true)]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn set_testimonial_approval(
        &self,
        id: Uuid,
        approved: bool,
        now: DateTime<Utc>,
    ) -> Result<Option<Testimonial>, AppError> {
        let doc_id = id.to_string();
        let Some(mut testimonial) = self
            .get_by_id::<Testimonial>(collections::TESTIMONIALS, &doc_id)
            .await?
        else {
            return Ok(None);
        };

        testimonial.is_approved = approved;
        testimonial.updated_at = now;
        self.put(collections::TESTIMONIALS, &doc_id, &testimonial)
            .await?;

        Ok(Some(testimonial))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_doc_id_escapes_slash() {
        assert_eq!(email_doc_id("a/b@example.com"), "a%2Fb%40example.com");
        assert!(!email_doc_id("plain@example.com").contains('/'));
    }
}
