use thiserror::Error;

/// Errors raised while turning raw text into an HTML snippet.
///
/// Parsing and reconciliation never fail; everything here comes from talking
/// to a completion backend or from configuring one.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(reqwest::Error),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("API key is missing: {0}")]
    MissingApiKey(String),
    #[error("AI provider is missing")]
    MissingAiProvider,
}
