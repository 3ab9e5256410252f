pub mod huggingface;
pub mod openai;

use crate::errors::GenerationError;
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// The marker both prompts use to close the input section. Backends are told
/// to stop generating if they reach it.
pub const STOP_MARKER: &str = "---";

/// Sampling parameters for a single completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    /// Sampling temperature (0.0 = deterministic).
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Sequences at which the backend should stop generating.
    pub stop: Option<Vec<String>>,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 2048,
            stop: None,
        }
    }
}

impl CompletionOptions {
    /// Options for the FAQ extraction call: low temperature, stop at `---`.
    pub fn extraction() -> Self {
        Self::default()
            .with_temperature(0.2)
            .with_stop(vec![STOP_MARKER.to_string()])
    }

    /// Options for the body formatting call.
    pub fn formatting() -> Self {
        Self::default()
            .with_temperature(0.3)
            .with_stop(vec![STOP_MARKER.to_string()])
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_stop(mut self, stop: Vec<String>) -> Self {
        self.stop = if stop.is_empty() { None } else { Some(stop) };
        self
    }
}

/// A trait for interacting with a text-completion backend.
///
/// Implementations take plain text in and hand plain text back, so the rest
/// of the pipeline does not care which backend is configured.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a completion for the given system and user prompt.
    ///
    /// An empty `system_prompt` means "no system message".
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, GenerationError>;
}

dyn_clone::clone_trait_object!(AiProvider);
