// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Page/limit pagination for admin listings.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 100;

/// Query parameters: `?page=1&limit=10`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    /// 1-indexed page number
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}
fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PageParams {
    /// Fill in defaults for missing values.
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or_else(default_page),
            limit: limit.unwrap_or_else(default_limit),
        }
    }

    /// Reject out-of-range values.
    pub fn validate(self) -> Result<Self> {
        if self.page < 1 {
            return Err(AppError::Validation(
                "Page must be greater than 0".to_string(),
            ));
        }
        if self.limit < 1 || self.limit > MAX_LIMIT {
            return Err(AppError::Validation(format!(
                "Limit must be between 1 and {}",
                MAX_LIMIT
            )));
        }
        Ok(self)
    }

    /// Slice one page out of an already-sorted list.
    pub fn paginate<T>(self, items: Vec<T>) -> (Vec<T>, Pagination) {
        let total_items = items.len() as u64;
        let limit = self.limit as usize;
        // Saturate so a huge page number just yields an empty page
        let start = (self.page as usize).saturating_sub(1).saturating_mul(limit);

        let page_items: Vec<T> = items.into_iter().skip(start).take(limit).collect();

        let pagination = Pagination {
            current_page: self.page,
            total_pages: total_items.div_ceil(u64::from(self.limit.max(1))),
            total_items,
            items_per_page: self.limit,
        };

        (page_items, pagination)
    }
}

/// Pagination metadata returned alongside a page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Pagination {
    pub current_page: u32,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_pages: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_items: u64,
    pub items_per_page: u32,
}
