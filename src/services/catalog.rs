// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Event catalog loading and year lookup.

use crate::models::Event;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Read-only mapping from game year to historical event.
///
/// Loaded once at startup. Lookups never fail: years without an entry
/// resolve to the "Unknown Event" placeholder.
#[derive(Debug, Clone)]
pub struct EventCatalog {
    events: HashMap<i32, Event>,
    fallback: Event,
}

impl Default for EventCatalog {
    fn default() -> Self {
        Self {
            events: HashMap::new(),
            fallback: Event::unknown(),
        }
    }
}

impl EventCatalog {
    /// Load events from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| CatalogError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load events from a JSON object keyed by year strings:
    /// `{"1703": {"name": ..., "lat": ..., "lon": ..., "hint": ...}}`.
    pub fn load_from_json(json_data: &str) -> Result<Self, CatalogError> {
        let raw: HashMap<String, Event> = serde_json::from_str(json_data)
            .map_err(|e| CatalogError::ParseError(e.to_string()))?;

        let mut events = HashMap::with_capacity(raw.len());
        for (key, event) in raw {
            let year: i32 = key
                .trim()
                .parse()
                .map_err(|_| CatalogError::InvalidYear(key.clone()))?;

            if !event.lat.is_finite() || !event.lon.is_finite() {
                return Err(CatalogError::InvalidLocation(key));
            }

            if events.insert(year, event).is_some() {
                return Err(CatalogError::DuplicateYear(year));
            }
        }

        tracing::info!(count = events.len(), "Loaded events");
        Ok(Self {
            events,
            fallback: Event::unknown(),
        })
    }

    /// Look up the event for a year, falling back to the placeholder.
    pub fn lookup(&self, year: i32) -> &Event {
        self.get(year).unwrap_or(&self.fallback)
    }

    /// Look up the event for a year without the fallback.
    pub fn get(&self, year: i32) -> Option<&Event> {
        self.events.get(&year)
    }

    /// Number of known events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the catalog has no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Errors from catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse event JSON: {0}")]
    ParseError(String),

    #[error("Event key is not an integer year: {0:?}")]
    InvalidYear(String),

    #[error("More than one event key resolves to year {0}")]
    DuplicateYear(i32),

    #[error("Event for year {0} has a non-finite location")]
    InvalidLocation(String),
}
