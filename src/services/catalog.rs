// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Meal plan catalog.

use crate::db::Store;
use crate::error::{AppError, Result};
use crate::models::MealPlan;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct CatalogService {
    db: Arc<dyn Store>,
}

impl CatalogService {
    pub fn new(db: Arc<dyn Store>) -> Self {
        Self { db }
    }

    /// Active plans, cheapest first.
    pub async fn list_active_plans(&self) -> Result<Vec<MealPlan>> {
        let mut plans = self.db.list_active_meal_plans().await?;
        plans.sort_by(|a, b| a.price.cmp(&b.price).then_with(|| a.name.cmp(&b.name)));
        Ok(plans)
    }

    /// One active plan. Inactive plans are reported as missing.
    pub async fn get_plan(&self, id: Uuid) -> Result<MealPlan> {
        self.db
            .get_meal_plan(id)
            .await?
            .filter(|plan| plan.is_active)
            .ok_or_else(|| AppError::NotFound("Meal plan not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryDb;
    use chrono::Utc;

    fn plan(name: &str, price: i64, is_active: bool) -> MealPlan {
        let now = Utc::now();
        MealPlan {
            id: Uuid::new_v4(),
            name: name.to_string(),
            price,
            description: None,
            features: vec![],
            image_url: None,
            is_active,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_list_sorted_and_filtered() {
        let db = Arc::new(MemoryDb::new());
        for p in [
            plan("Royal Plan", 60_000, true),
            plan("Protein Plan", 40_000, true),
            plan("Diet Plan", 30_000, true),
            plan("Budget Plan", 30_000, true),
            plan("Retired Plan", 10_000, false),
        ] {
            db.upsert_meal_plan(&p).await.unwrap();
        }

        let names: Vec<String> = CatalogService::new(db)
            .list_active_plans()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();

        assert_eq!(
            names,
            vec!["Budget Plan", "Diet Plan", "Protein Plan", "Royal Plan"]
        );
    }

    #[tokio::test]
    async fn test_get_inactive_plan_is_not_found() {
        let db = Arc::new(MemoryDb::new());
        let retired = plan("Retired", 1, false);
        db.upsert_meal_plan(&retired).await.unwrap();

        let catalog = CatalogService::new(db);
        assert!(matches!(
            catalog.get_plan(retired.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
