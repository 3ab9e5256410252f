//! # Snippet Route Handlers
//!
//! Generation and retrieval of the session's "About" snippet. The session
//! keeps only the latest successful output; a failed or empty request leaves
//! it untouched.

use super::{wrap_response, ApiResponse, AppError, AppState};
use crate::{
    auth::middleware::AuthenticatedSession,
    types::{GenerateRequest, MessageResponse, SnippetResponse},
};
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use tracing::info;

/// The file name offered when downloading the snippet.
pub const SNIPPET_FILE_NAME: &str = "about_snippet.html";

const NO_SNIPPET: &str = "No snippet has been generated yet.";

/// The handler for `POST /generate`.
pub async fn generate_handler(
    State(app_state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<ApiResponse<SnippetResponse>>, AppError> {
    info!(
        session_id = %session.id,
        "Received generate request ({} chars)",
        payload.text.len()
    );

    let snippet = app_state
        .generator
        .generate(&payload.text)
        .await?
        .ok_or(AppError::EmptyInput)?;

    app_state
        .sessions
        .store_output(&session.id, snippet.clone());

    Ok(wrap_response(SnippetResponse {
        html: snippet.html,
        faqs: snippet.faqs,
    }))
}

/// The handler for `GET /snippet`.
pub async fn get_snippet_handler(
    State(app_state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
) -> Result<Json<ApiResponse<SnippetResponse>>, AppError> {
    let snippet = app_state
        .sessions
        .last_output(&session.id)
        .ok_or_else(|| AppError::NotFound(NO_SNIPPET.to_string()))?;

    Ok(wrap_response(SnippetResponse {
        html: snippet.html,
        faqs: snippet.faqs,
    }))
}

/// The handler for `GET /snippet/download`. Serves the HTML as an attachment.
pub async fn download_snippet_handler(
    State(app_state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
) -> Result<impl IntoResponse, AppError> {
    let snippet = app_state
        .sessions
        .last_output(&session.id)
        .ok_or_else(|| AppError::NotFound(NO_SNIPPET.to_string()))?;

    let disposition = format!("attachment; filename=\"{SNIPPET_FILE_NAME}\"");
    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        snippet.html,
    ))
}

/// The handler for `DELETE /snippet`. Clearing an empty session is not an error.
pub async fn clear_snippet_handler(
    State(app_state): State<AppState>,
    AuthenticatedSession(session): AuthenticatedSession,
) -> Json<ApiResponse<MessageResponse>> {
    let cleared = app_state.sessions.clear_output(&session.id).is_some();
    info!(session_id = %session.id, cleared, "Cleared snippet");
    wrap_response(MessageResponse {
        message: "Snippet cleared.".to_string(),
    })
}
