use quickabout::errors::GenerationError;
use quickabout::providers::ai::{AiProvider, CompletionOptions};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

// --- Mock AI Provider ---

/// What the mock does when a prompt matches one of its keys.
#[derive(Clone, Debug)]
enum Programmed {
    Reply(String),
    Fail(String),
}

/// One call as seen by the mock.
#[derive(Clone, Debug)]
pub struct MockCall {
    pub system_prompt: String,
    pub user_prompt: String,
    pub options: CompletionOptions,
}

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    responses: Arc<Mutex<Vec<(String, Programmed)>>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Pre-programs a response for a specific prompt.
    /// The key should be a unique substring of the system or user prompt.
    /// Keys are tried in the order they were added.
    pub fn add_response(&self, key: &str, response: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.push((key.to_string(), Programmed::Reply(response.to_string())));
    }

    /// Pre-programs a backend failure for a specific prompt.
    pub fn add_failure(&self, key: &str, message: &str) {
        let mut responses = self.responses.lock().unwrap();
        responses.push((key.to_string(), Programmed::Fail(message.to_string())));
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push(MockCall {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            options: options.clone(),
        });

        let responses = self.responses.lock().unwrap();
        for (key, programmed) in responses.iter() {
            if system_prompt.contains(key.as_str()) || user_prompt.contains(key.as_str()) {
                return match programmed {
                    Programmed::Reply(text) => Ok(text.clone()),
                    Programmed::Fail(message) => Err(GenerationError::AiApi(message.clone())),
                };
            }
        }

        Err(GenerationError::AiApi(format!(
            "MockAiProvider: No response programmed for prompt. Got: '{user_prompt}'"
        )))
    }
}

// --- Test-Specific Helpers ---

/// A unique substring of the FAQ extraction prompt.
pub const FAQ_PROMPT_KEY: &str = "extract up to 5 FAQs";
/// A unique substring of the body formatting prompt.
pub const BODY_PROMPT_KEY: &str = "Output only the body sections";

/// Builds a mock that answers both pipeline calls.
pub fn mock_pipeline(faq_reply: &str, body_reply: &str) -> MockAiProvider {
    let mock = MockAiProvider::new();
    mock.add_response(FAQ_PROMPT_KEY, faq_reply);
    mock.add_response(BODY_PROMPT_KEY, body_reply);
    mock
}
