use chrono::{DateTime, Utc};
use quickabout::FaqItem;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub result: T,
}

// --- Auth Payloads ---

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
pub struct SessionInfo {
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub has_output: bool,
}

// --- Snippet Payloads ---

#[derive(Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Serialize, Deserialize)]
pub struct SnippetResponse {
    pub html: String,
    pub faqs: Vec<FaqItem>,
}

#[derive(Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
