//! Utility functions and helpers

use chrono::{DateTime, Days, Utc};

use crate::shared::errors::InvalidInput;

/// Format a USD amount with two decimals
pub fn format_usd(value: f64) -> String {
    format!("${:.2}", value)
}

/// Generate unique ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// `now` moved forward by whole calendar days, rejecting dates chrono cannot represent
pub fn days_after(now: DateTime<Utc>, days: u64) -> Result<DateTime<Utc>, InvalidInput> {
    now.checked_add_days(Days::new(days)).ok_or(InvalidInput::DateOutOfRange {
        days: i64::try_from(days).unwrap_or(i64::MAX),
    })
}
