// SPDX-License-Identifier: MIT
// Copyright 2026 FantaPL Developers

//! Shared helpers for date/time arithmetic on kickoff times.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Truncate a timestamp to UTC midnight.
pub fn truncate_to_midnight(date: DateTime<Utc>) -> DateTime<Utc> {
    date.date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
        .and_utc()
}

/// True if two timestamps are less than `hours` apart (either direction).
pub fn within_hours(a: DateTime<Utc>, b: DateTime<Utc>, hours: i64) -> bool {
    (a - b).num_hours().abs() < hours
}

/// True if two timestamps fall on the same UTC calendar day.
pub fn same_utc_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.date_naive() == b.date_naive()
}
