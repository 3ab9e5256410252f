#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Shared helpers for the `quickabout` integration tests: tracing setup and a
//! scripted mock provider that replays canned replies in order.

use async_trait::async_trait;
use dotenvy::dotenv;
use quickabout::{
    providers::ai::{AiProvider, CompletionOptions},
    GenerationError,
};
use std::sync::{Arc, Once, RwLock};

static INIT: Once = Once::new();

/// Initializes the tracing subscriber and loads .env for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// One recorded call to the mock provider.
#[derive(Clone, Debug)]
pub struct RecordedCall {
    pub system_prompt: String,
    pub user_prompt: String,
    pub options: CompletionOptions,
}

/// A reply the mock hands back, in call order.
#[derive(Clone, Debug)]
pub enum Scripted {
    Reply(String),
    Fail(String),
}

// --- Mock AI Provider for Pipeline Testing ---
#[derive(Clone, Debug)]
pub struct MockAiProvider {
    pub call_history: Arc<RwLock<Vec<RecordedCall>>>,
    script: Arc<RwLock<Vec<Scripted>>>,
}

impl MockAiProvider {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            call_history: Arc::new(RwLock::new(Vec::new())),
            script: Arc::new(RwLock::new(script.into_iter().rev().collect())),
        }
    }

    pub fn replying(replies: &[&str]) -> Self {
        Self::new(
            replies
                .iter()
                .map(|r| Scripted::Reply(r.to_string()))
                .collect(),
        )
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.call_history.read().unwrap().clone()
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
        self.call_history.write().unwrap().push(RecordedCall {
            system_prompt: system_prompt.to_string(),
            user_prompt: user_prompt.to_string(),
            options: options.clone(),
        });

        match self.script.write().unwrap().pop() {
            Some(Scripted::Reply(text)) => Ok(text),
            Some(Scripted::Fail(message)) => Err(GenerationError::AiApi(message)),
            None => Err(GenerationError::AiApi(
                "MockAiProvider: script exhausted".to_string(),
            )),
        }
    }
}
