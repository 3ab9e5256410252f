//! # AI Provider Factory
//!
//! Centralizes backend selection so the server and the CLI build providers the
//! same way. A single boolean picks between the hosted chat-completion backend
//! and the open inference backend.

use crate::{
    errors::GenerationError,
    providers::ai::{
        huggingface::{default_hf_api_url, HuggingFaceProvider, DEFAULT_HF_MODEL},
        openai::{OpenAiProvider, DEFAULT_OPENAI_API_URL, DEFAULT_OPENAI_MODEL},
        AiProvider,
    },
};
use std::env;
use tracing::info;

/// The completion backends QuickAbout knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    OpenAi,
    HuggingFace,
}

/// Everything needed to construct either backend.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendSettings {
    /// `true` selects the open inference backend instead of the hosted one.
    pub use_open_backend: bool,
    pub openai_api_url: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    /// Defaults to the hosted Inference API URL for `hf_model` when unset.
    pub hf_api_url: Option<String>,
    pub hf_api_token: Option<String>,
    pub hf_model: String,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            use_open_backend: false,
            openai_api_url: DEFAULT_OPENAI_API_URL.to_string(),
            openai_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            hf_api_url: None,
            hf_api_token: None,
            hf_model: DEFAULT_HF_MODEL.to_string(),
        }
    }
}

impl BackendSettings {
    /// Reads settings from the process environment, keeping defaults for
    /// anything unset or empty.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            use_open_backend: non_empty_var("USE_OPEN_BACKEND")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.use_open_backend),
            openai_api_url: non_empty_var("OPENAI_API_URL").unwrap_or(defaults.openai_api_url),
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            openai_model: non_empty_var("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            hf_api_url: non_empty_var("HF_API_URL"),
            hf_api_token: non_empty_var("HF_API_TOKEN"),
            hf_model: non_empty_var("HF_MODEL").unwrap_or(defaults.hf_model),
        }
    }

    pub fn backend(&self) -> Backend {
        if self.use_open_backend {
            Backend::HuggingFace
        } else {
            Backend::OpenAi
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Interprets common truthy spellings; everything else is `false`.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Creates the configured AI provider.
pub fn create_provider(settings: &BackendSettings) -> Result<Box<dyn AiProvider>, GenerationError> {
    let provider: Box<dyn AiProvider> = match settings.backend() {
        Backend::OpenAi => {
            let api_key = settings.openai_api_key.clone().ok_or_else(|| {
                GenerationError::MissingApiKey(
                    "OPENAI_API_KEY must be set to use the hosted backend.".to_string(),
                )
            })?;
            info!(
                model = %settings.openai_model,
                "Configuring OpenAI provider with URL: {}", settings.openai_api_url
            );
            Box::new(OpenAiProvider::new(
                settings.openai_api_url.clone(),
                api_key,
                settings.openai_model.clone(),
            )?)
        }
        Backend::HuggingFace => {
            let api_url = settings
                .hf_api_url
                .clone()
                .unwrap_or_else(|| default_hf_api_url(&settings.hf_model));
            info!(
                model = %settings.hf_model,
                "Configuring Hugging Face provider with URL: {}", api_url
            );
            Box::new(HuggingFaceProvider::new(
                api_url,
                settings.hf_api_token.clone(),
            )?)
        }
    };

    Ok(provider)
}
