//! # Authentication Route Handlers
//!
//! Login against the single configured operator account, logout, and a
//! session introspection endpoint.

use super::{wrap_response, ApiResponse, AppError, AppState};
use crate::{
    auth::middleware::{issue_token, AuthenticatedSession},
    types::{LoginRequest, LoginResponse, MessageResponse, SessionInfo},
};
use axum::{extract::State, Json};
use chrono::Utc;
use tracing::{info, warn};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Checks the submitted credentials against `LOGIN_USERNAME`/`LOGIN_PASSWORD`.
///
/// When either is not configured every login is refused.
fn credentials_match(state: &AppState, username: &str, password: &str) -> bool {
    match (&state.config.login_username, &state.config.login_password) {
        (Some(expected_user), Some(expected_password)) => {
            username == expected_user && password == expected_password
        }
        _ => {
            warn!("Login attempted but LOGIN_USERNAME/LOGIN_PASSWORD are not configured.");
            false
        }
    }
}

/// The handler for `POST /auth/login`.
pub async fn login_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    if !credentials_match(&app_state, &payload.username, &payload.password) {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let ttl = app_state.config.session_ttl();
    app_state.sessions.purge_expired(Utc::now(), ttl);

    let session = app_state.sessions.create(&payload.username);
    let token = issue_token(&app_state.config.jwt_secret, &session, ttl)
        .map_err(|e| anyhow::anyhow!("Failed to sign session token: {e}"))?;
    info!(session_id = %session.id, "Login successful for '{}'", session.username);

    Ok(wrap_response(LoginResponse {
        token,
        expires_at: session.expires_at(ttl),
    }))
}

/// The handler for `POST /auth/logout`. Drops the session and its output.
pub async fn logout_handler(
    State(app_state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
) -> Json<ApiResponse<MessageResponse>> {
    app_state.sessions.remove(&session.id);
    wrap_response(MessageResponse {
        message: "Logged out.".to_string(),
    })
}

/// The handler for `GET /auth/session`.
pub async fn session_info_handler(
    State(app_state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
) -> Json<ApiResponse<SessionInfo>> {
    let ttl = app_state.config.session_ttl();
    wrap_response(SessionInfo {
        expires_at: session.expires_at(ttl),
        has_output: session.last_output.is_some(),
        username: session.username,
        created_at: session.created_at,
    })
}
