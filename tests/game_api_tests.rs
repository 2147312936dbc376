// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Game endpoint tests: puzzle lookup, explicit years and guess scoring.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use daily_pinpoint::time_utils::{game_year_for, today};
use tower::ServiceExt;

mod common;

async fn get(uri: &str) -> Response {
    let (app, _) = common::create_test_app();
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_guess(body: &str, token: Option<&str>) -> Response {
    let (app, _) = common::create_test_app();
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/guess")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

// ─── Puzzle ──────────────────────────────────────────────────

#[tokio::test]
async fn test_daily_puzzle_uses_derived_year() {
    let response = get("/api/puzzle").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["year"], game_year_for(today(), 2025));
    assert!(body["hint"].is_string());
    assert!(body.get("name").is_none());
}

#[tokio::test]
async fn test_play_explicit_year() {
    let response = get("/api/play?year=1703").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["year"], 1703);
    assert_eq!(body["hint"], "A new capital on the Neva.");
}

#[tokio::test]
async fn test_play_unknown_year_uses_fallback_hint() {
    let body = common::body_json(get("/api/play?year=-500").await).await;
    assert_eq!(body["year"], -500);
    assert_eq!(body["hint"], "No known event for this year.");
}

#[tokio::test]
async fn test_play_without_year_redirects() {
    let response = get("/api/play").await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/api/puzzle");
}

#[tokio::test]
async fn test_play_rejects_malformed_year() {
    let response = get("/api/play?year=seventeen").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ─── Guess ───────────────────────────────────────────────────

#[tokio::test]
async fn test_guess_known_event() {
    // Guess London for the Bastille in Paris.
    let response = post_guess(r#"{"lat": 51.5074, "lon": -0.1278, "year": 1789}"#, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["event"], "Storming of the Bastille");
    assert_eq!(body["hint"], "A fortress prison falls.");
    assert_eq!(body["actual_location"]["lat"], 48.8532);
    assert_eq!(body["actual_location"]["lon"], 2.3692);

    let distance = body["distance"].as_f64().unwrap();
    assert!(distance > 340.0 && distance < 346.0, "got {distance}");
    assert_eq!((distance * 100.0).round() / 100.0, distance);
}

#[tokio::test]
async fn test_guess_exact_location_scores_zero() {
    let response = post_guess(r#"{"lat": 59.95, "lon": 30.3167, "year": "1703"}"#, None).await;
    let body = common::body_json(response).await;
    assert_eq!(body["distance"], 0.0);
}

#[tokio::test]
async fn test_guess_unknown_year_scores_against_origin() {
    let response = post_guess(r#"{"lat": 0, "lon": 90, "year": 1000}"#, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["event"], "Unknown Event");
    assert_eq!(body["hint"], "No known event for this year.");
    assert_eq!(body["actual_location"]["lat"], 0.0);
    assert_eq!(body["actual_location"]["lon"], 0.0);
    assert_eq!(body["distance"], 10007.54);
}

#[tokio::test]
async fn test_guess_rejects_out_of_range_latitude() {
    let response = post_guess(r#"{"lat": 123.0, "lon": 0, "year": 1703}"#, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_guess_rejects_malformed_year() {
    let response = post_guess(r#"{"lat": 0, "lon": 0, "year": "17o3"}"#, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_guess_rejects_non_numeric_coordinates() {
    let response = post_guess(r#"{"lat": "north", "lon": 0, "year": 1703}"#, None).await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_guess_with_invalid_token_is_anonymous() {
    // A bad token never blocks play; the guess is simply not recorded.
    let response = post_guess(
        r#"{"lat": 59.95, "lon": 30.3167, "year": 1703}"#,
        Some("not.a.jwt"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_authenticated_guess_attempts_to_record() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("alice", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/guess")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::from(r#"{"lat": 59.95, "lon": 30.3167, "year": 1703}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    // The offline database cannot store the score.
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
