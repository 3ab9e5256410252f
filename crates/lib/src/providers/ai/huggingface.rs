use crate::{
    errors::GenerationError,
    providers::ai::{AiProvider, CompletionOptions},
};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::debug;

pub const DEFAULT_HF_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";

/// Builds the hosted Inference API URL for a model.
pub fn default_hf_api_url(model: &str) -> String {
    format!("https://api-inference.huggingface.co/models/{model}")
}

// --- Text-generation request and response structures ---

#[derive(Serialize)]
struct TextGenerationRequest<'a> {
    inputs: String,
    parameters: TextGenerationParameters<'a>,
}

#[derive(Serialize)]
struct TextGenerationParameters<'a> {
    temperature: f32,
    max_new_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<&'a [String]>,
    return_full_text: bool,
}

#[derive(Deserialize, Debug)]
struct TextGeneration {
    generated_text: String,
}

// --- Hugging Face Provider implementation ---

/// A provider for open text-generation backends speaking the Hugging Face
/// Inference API protocol (hosted Inference API or a self-hosted TGI server).
#[derive(Clone)]
pub struct HuggingFaceProvider {
    client: ReqwestClient,
    api_url: String,
    api_token: Option<String>,
}

impl Debug for HuggingFaceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFaceProvider")
            .field("api_url", &self.api_url)
            .field("has_token", &self.api_token.is_some())
            .finish()
    }
}

impl HuggingFaceProvider {
    /// Creates a new `HuggingFaceProvider`.
    pub fn new(api_url: String, api_token: Option<String>) -> Result<Self, GenerationError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(GenerationError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_token,
        })
    }
}

/// Text-generation endpoints take a single input string, so the system prompt
/// is folded in front of the user prompt.
fn combine_prompts(system_prompt: &str, user_prompt: &str) -> String {
    if system_prompt.is_empty() {
        user_prompt.to_string()
    } else {
        format!("{system_prompt}\n\n{user_prompt}")
    }
}

#[async_trait]
impl AiProvider for HuggingFaceProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, GenerationError> {
        let request_body = TextGenerationRequest {
            inputs: combine_prompts(system_prompt, user_prompt),
            parameters: TextGenerationParameters {
                temperature: options.temperature,
                max_new_tokens: options.max_tokens,
                stop: options.stop.as_deref(),
                return_full_text: false,
            },
        };

        debug!(url = %self.api_url, "--> Sending text generation request");

        let mut request_builder = self.client.post(&self.api_url);
        if let Some(token) = &self.api_token {
            request_builder = request_builder.bearer_auth(token);
        }

        let response = request_builder
            .json(&request_body)
            .send()
            .await
            .map_err(GenerationError::AiRequest)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenerationError::AiApi(format!("{status}: {error_text}")));
        }

        let generations: Vec<TextGeneration> = response
            .json()
            .await
            .map_err(GenerationError::AiDeserialization)?;

        let text = generations
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .unwrap_or_default();

        debug!("<-- Generated text: {}", text);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_prompts_without_system() {
        assert_eq!(combine_prompts("", "user text"), "user text");
    }

    #[test]
    fn test_combine_prompts_with_system() {
        assert_eq!(
            combine_prompts("You format text.", "user text"),
            "You format text.\n\nuser text"
        );
    }

    #[test]
    fn test_default_hf_api_url() {
        assert_eq!(
            default_hf_api_url("org/model"),
            "https://api-inference.huggingface.co/models/org/model"
        );
    }
}
