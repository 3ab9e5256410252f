use quickabout::GenerationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the server,
/// allowing them to be converted into appropriate HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Errors originating from the `quickabout` pipeline.
    Generation(GenerationError),
    /// The submitted text was empty or whitespace.
    EmptyInput,
    /// The requested resource does not exist.
    NotFound(String),
    /// Login failed.
    Unauthorized(String),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

/// Conversion from `GenerationError` to `AppError`.
impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        AppError::Generation(err)
    }
}

/// Conversion from `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Generation(err) => {
                // Log the original error for debugging purposes
                error!("GenerationError: {:?}", err);
                match err {
                    GenerationError::MissingAiProvider | GenerationError::MissingApiKey(_) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Server is not configured correctly.".to_string(),
                    ),
                    GenerationError::AiRequest(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Request to AI provider failed: {e}"),
                    ),
                    GenerationError::AiDeserialization(e) => (
                        StatusCode::BAD_GATEWAY,
                        format!("Failed to deserialize AI provider response: {e}"),
                    ),
                    GenerationError::AiApi(e) => {
                        (StatusCode::BAD_GATEWAY, format!("AI provider error: {e}"))
                    }
                    GenerationError::ReqwestClientBuild(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to build HTTP client: {e}"),
                    ),
                }
            }
            AppError::EmptyInput => (
                StatusCode::BAD_REQUEST,
                "Please enter some text to generate a snippet.".to_string(),
            ),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::Unauthorized(message) => {
                warn!("Unauthorized: {}", message);
                (StatusCode::UNAUTHORIZED, message)
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
