// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account registration and session routes.

use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, SESSION_COOKIE, SESSION_TTL_DAYS};
use crate::models::user::{is_valid_username, normalize_username};
use crate::models::User;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

fn validate_username(username: &str) -> std::result::Result<(), ValidationError> {
    if is_valid_username(username.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new("username")
            .with_message("3-20 characters: letters, digits, '_' or '-'".into()))
    }
}

/// Credentials for registration and login.
#[derive(Deserialize, Validate)]
pub struct Credentials {
    #[validate(custom(function = "validate_username"))]
    pub username: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RegisterResponse {
    pub username: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionResponse {
    pub username: String,
    pub token: String,
}

/// Create an account.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Credentials>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    body.validate()?;
    let username = normalize_username(&body.username);

    let password_hash = state
        .password_hasher
        .hash(&body.password)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?;

    let user = User {
        username: username.clone(),
        password_hash,
        created_at: crate::time_utils::now_rfc3339(),
    };

    state.db.create_user(&user).await.map_err(|e| {
        if matches!(e, AppError::Conflict(_)) {
            tracing::info!(username = %username, "Registration rejected: username taken");
        }
        e
    })?;

    tracing::info!(username = %username, "Account created");
    Ok((StatusCode::CREATED, Json(RegisterResponse { username })))
}

/// Log in and start a cookie session.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<Credentials>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    // Malformed usernames cannot exist, so treat them like bad credentials.
    if body.validate().is_err() {
        return Err(AppError::Unauthorized);
    }
    let username = normalize_username(&body.username);

    let user = state.db.get_user(&username).await?;
    let verified = user
        .as_ref()
        .map(|u| state.password_hasher.verify(&body.password, &u.password_hash))
        .unwrap_or(false);

    if !verified {
        tracing::info!(username = %username, "Login failed");
        return Err(AppError::Unauthorized);
    }

    let token = create_jwt(&username, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    tracing::info!(username = %username, "Login successful");

    let jar = jar.add(session_cookie(&state.config, token.clone()));
    Ok((jar, Json(SessionResponse { username, token })))
}

/// Log out by clearing the session cookie.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, StatusCode) {
    let removal = session_cookie(&state.config, String::new());
    (jar.remove(removal), StatusCode::NO_CONTENT)
}

/// Session cookie with the attributes used for both setting and removal.
fn session_cookie(config: &Config, token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure_cookies())
        .max_age(time::Duration::days(SESSION_TTL_DAYS))
        .build()
}
