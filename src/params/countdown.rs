//! Countdown clock configuration.

use chrono::{DateTime, NaiveDate, Utc};

/// Countdown target and reference dates
#[derive(Debug, Clone)]
pub struct CountdownConfig {
    /// Name of the awaited event, shown in the window title
    pub label: String,

    /// Instant the countdown runs toward
    pub target: DateTime<Utc>,

    /// Instant the "days since" counter runs from
    pub since: DateTime<Utc>,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            label: "GTA VI".to_string(),
            target: utc_midnight(NaiveDate::from_ymd_opt(2025, 9, 23)),
            since: utc_midnight(NaiveDate::from_ymd_opt(2023, 12, 5)),
        }
    }
}

/// Date-only values denote midnight UTC
pub fn utc_midnight(date: Option<NaiveDate>) -> DateTime<Utc> {
    date.and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}
