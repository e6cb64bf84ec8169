// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Shared helpers for date/time parsing and formatting.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a calendar date from `YYYY-MM-DD` or an RFC3339 timestamp.
///
/// Browsers usually send `new Date(..)` values, so the timestamp form is
/// accepted and reduced to its UTC date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

/// Serde helper for optional request dates in either accepted format.
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date(value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(
            parse_date("2025-03-01"),
            NaiveDate::from_ymd_opt(2025, 3, 1)
        );
    }

    #[test]
    fn test_parse_browser_timestamp() {
        assert_eq!(
            parse_date("2025-03-01T00:00:00.000Z"),
            NaiveDate::from_ymd_opt(2025, 3, 1)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_date("next tuesday"), None);
        assert_eq!(parse_date("2025-13-01"), None);
    }

    #[test]
    fn test_format_uses_z_suffix() {
        let date = DateTime::from_timestamp(1_704_103_200, 0).unwrap();
        assert_eq!(format_utc_rfc3339(date), "2024-01-01T10:00:00Z");
    }
}
