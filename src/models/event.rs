// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Historical event model and the year key used to look events up.

use crate::error::AppError;
use geo::Point;
use serde::{Deserialize, Serialize};

/// Name of the placeholder event returned for years with no entry.
pub const UNKNOWN_EVENT_NAME: &str = "Unknown Event";
/// Hint of the placeholder event.
pub const UNKNOWN_EVENT_HINT: &str = "No known event for this year.";

/// A historical event tied to a game year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event name (e.g., "Founding of Saint Petersburg")
    pub name: String,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Hint shown to the player before guessing
    pub hint: String,
}

impl Event {
    /// Placeholder for years with no known event, located at (0, 0).
    pub fn unknown() -> Self {
        Self {
            name: UNKNOWN_EVENT_NAME.to_string(),
            lat: 0.0,
            lon: 0.0,
            hint: UNKNOWN_EVENT_HINT.to_string(),
        }
    }

    /// Event location as a geo point (x = longitude, y = latitude).
    pub fn location(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

/// Year as submitted by a client: either a JSON integer or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum YearKey {
    Number(i64),
    Text(String),
}

impl YearKey {
    /// Resolve to an integer game year, rejecting anything non-integral.
    pub fn resolve(&self) -> Result<i32, AppError> {
        match self {
            YearKey::Number(n) => i32::try_from(*n)
                .map_err(|_| AppError::BadRequest(format!("Year out of range: {}", n))),
            YearKey::Text(s) => parse_year(s),
        }
    }
}

/// Parse a year string such as `"1703"` or `"-44"`.
pub fn parse_year(raw: &str) -> Result<i32, AppError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AppError::BadRequest(format!("Invalid year: {:?}", raw)))
}
