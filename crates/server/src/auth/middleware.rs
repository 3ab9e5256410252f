//! # Authentication Middleware
//!
//! JWT-based login gate. A token is issued at login and names the session it
//! belongs to; the `AuthenticatedSession` extractor resolves that session on
//! every protected request.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use super::session::Session;
use crate::state::AppState;

/// Represents the claims we expect to find in the JWT.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The operator's username.
    pub sub: String,
    /// The session this token was issued for.
    pub sid: Uuid,
    /// Issued-at timestamp.
    pub iat: usize,
    /// The expiration timestamp.
    pub exp: usize,
}

/// Signs a token for `session` that expires together with it.
pub fn issue_token(
    secret: &str,
    session: &Session,
    ttl: Duration,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: session.username.clone(),
        sid: session.id,
        iat: session.created_at.timestamp().max(0) as usize,
        exp: session.expires_at(ttl).timestamp().max(0) as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
}

/// An Axum extractor that resolves the caller's live session.
///
/// 1.  **No Token Present**: `401 Unauthorized`.
/// 2.  **Invalid Token**: `401 Unauthorized`.
/// 3.  **Unknown Session** (logged out, or server restarted): `401 Unauthorized`.
/// 4.  **Expired Session**: the session is dropped and the request is rejected
///     with `401 Unauthorized`.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession(pub Session);

/// A custom rejection type for authentication failures.
pub struct AuthError(StatusCode, String);

impl AuthError {
    fn unauthorized(message: &str) -> Self {
        AuthError(StatusCode::UNAUTHORIZED, message.to_string())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.0, Json(json!({ "error": self.1 }))).into_response()
    }
}

impl FromRequestParts<AppState> for AuthenticatedSession {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AuthError::unauthorized("Missing or malformed Authorization header."))?;

        // Expiry is enforced against the session below, not the token.
        let mut validation = Validation::default();
        validation.validate_exp = false;

        let token_data = decode::<Claims>(
            bearer.token(),
            &DecodingKey::from_secret(state.config.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|e| {
            warn!("JWT validation failed: {}", e);
            AuthError::unauthorized("Invalid or expired token.")
        })?;

        let session_id = token_data.claims.sid;
        let session = state
            .sessions
            .get(&session_id)
            .ok_or_else(|| AuthError::unauthorized("Session not found. Please log in again."))?;

        if session.is_expired(Utc::now(), state.config.session_ttl()) {
            info!(session_id = %session_id, "Session expired; removing it.");
            state.sessions.remove(&session_id);
            return Err(AuthError::unauthorized(
                "Session expired. Please log in again.",
            ));
        }

        Ok(AuthenticatedSession(session))
    }
}
