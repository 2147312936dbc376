// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time handling and the game-year formula.

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Current time as a stored timestamp string.
pub fn now_rfc3339() -> String {
    format_utc_rfc3339(Utc::now())
}

/// Current calendar date (UTC). Scores are bucketed by this date.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Game year for a calendar date: `base_year - (month * 100 + day)`.
///
/// March 22 becomes 322, so with base 2025 the puzzle year is 1703.
pub fn game_year_for(date: NaiveDate, base_year: i32) -> i32 {
    let date_number = date.month() as i32 * 100 + date.day() as i32;
    base_year - date_number
}
