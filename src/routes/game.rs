// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public game routes: daily puzzle, explicit-year play and guess scoring.

use crate::error::Result;
use crate::middleware::auth::authenticate;
use crate::models::event::parse_year;
use crate::models::YearKey;
use crate::services::distance::round_km;
use crate::time_utils::{game_year_for, today};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use geo::Point;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/puzzle", get(get_puzzle))
        .route("/api/play", get(play_year))
        .route("/api/guess", post(submit_guess))
}

// ─── Puzzle ──────────────────────────────────────────────────

/// Puzzle shown before guessing. Never includes the event name.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PuzzleResponse {
    pub year: i32,
    pub hint: String,
}

fn puzzle_for(state: &AppState, year: i32) -> PuzzleResponse {
    PuzzleResponse {
        year,
        hint: state.catalog.lookup(year).hint.clone(),
    }
}

/// Today's puzzle, derived from the calendar date.
async fn get_puzzle(State(state): State<Arc<AppState>>) -> Json<PuzzleResponse> {
    let year = game_year_for(today(), state.config.puzzle_base_year);
    Json(puzzle_for(&state, year))
}

#[derive(Deserialize)]
struct PlayQuery {
    year: Option<String>,
}

/// Puzzle for an explicitly chosen year.
async fn play_year(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PlayQuery>,
) -> Result<Response> {
    let raw = match params.year.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(Redirect::temporary("/api/puzzle").into_response()),
    };

    let year = parse_year(raw)?;
    Ok(Json(puzzle_for(&state, year)).into_response())
}

// ─── Guess ───────────────────────────────────────────────────

/// Guess submission body.
#[derive(Deserialize, Validate)]
pub struct GuessRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
    pub year: YearKey,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

/// Result of a guess.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GuessResponse {
    pub event: String,
    pub hint: String,
    pub actual_location: Location,
    /// Kilometers, rounded to 2 decimal places
    pub distance: f64,
}

/// Score a guess. Signed-in players also get today's record merged.
async fn submit_guess(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(body): Json<GuessRequest>,
) -> Result<Json<GuessResponse>> {
    body.validate()?;
    let year = body.year.resolve()?;

    let user = authenticate(&jar, &headers, &state.config.jwt_signing_key);
    let event = state.catalog.lookup(year);

    let scored = state
        .score_service
        .score_guess(user.as_ref(), event, Point::new(body.lon, body.lat), today())
        .await?;

    tracing::debug!(
        year,
        user_id = user.as_ref().map(|u| u.user_id.as_str()),
        distance_km = scored.distance_km,
        "Guess scored"
    );

    Ok(Json(GuessResponse {
        event: event.name.clone(),
        hint: event.hint.clone(),
        actual_location: Location {
            lat: event.lat,
            lon: event.lon,
        },
        distance: round_km(scored.distance_km),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> GuessRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_guess_request_accepts_string_year() {
        let body = request(r#"{"lat": 10.5, "lon": -20.25, "year": "1703"}"#);
        assert!(body.validate().is_ok());
        assert_eq!(body.year.resolve().unwrap(), 1703);
    }

    #[test]
    fn test_guess_request_rejects_out_of_range_coordinates() {
        assert!(request(r#"{"lat": 91, "lon": 0, "year": 1703}"#)
            .validate()
            .is_err());
        assert!(request(r#"{"lat": 0, "lon": -180.5, "year": 1703}"#)
            .validate()
            .is_err());
        assert!(request(r#"{"lat": -90, "lon": 180, "year": 1703}"#)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_guess_request_rejects_non_numeric_coordinates() {
        let parsed: std::result::Result<GuessRequest, _> =
            serde_json::from_str(r#"{"lat": "north", "lon": 0, "year": 1703}"#);
        assert!(parsed.is_err());
    }
}
