//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for the `quickabout-server`.
//! The handlers are split into logical sub-modules based on their functionality.

// Sub-modules for different handler categories.
pub mod auth_handlers;
pub mod general;
pub mod snippet_handlers;

// Re-export all handlers from the sub-modules to make them easily accessible
// to the router under a single `handlers::` path.
pub use auth_handlers::*;
pub use general::*;
pub use snippet_handlers::*;

// Shared items used by multiple handler modules.
use super::{errors::AppError, state::AppState, types::ApiResponse};
use axum::Json;

/// A shared helper function to wrap a successful result in the standard `ApiResponse` format.
pub(crate) fn wrap_response<T>(result: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse { result })
}
