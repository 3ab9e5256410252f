//! # Application State
//!
//! The shared application state (`AppState`) and the logic for building it at
//! startup: the configuration, the snippet generator with its completion
//! backend, and the session store.

use crate::{auth::session::SessionStore, config::AppConfig};
use quickabout::{
    providers::{ai::AiProvider, factory::create_provider},
    SnippetGenerator, SnippetGeneratorBuilder,
};
use std::sync::Arc;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration, loaded from `config.yml` and the environment.
    pub config: Arc<AppConfig>,
    /// The generation pipeline, bound to the configured backend.
    pub generator: Arc<SnippetGenerator>,
    /// Live login sessions and their last output.
    pub sessions: SessionStore,
}

/// Builds the shared application state from the configuration.
///
/// Fails if the configured backend cannot be constructed (for example, the
/// hosted backend without an API key).
pub fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let provider = create_provider(&config.backend_settings())?;
    build_app_state_with_provider(config, provider)
}

/// Builds the state around an already constructed provider.
pub fn build_app_state_with_provider(
    config: AppConfig,
    provider: Box<dyn AiProvider>,
) -> anyhow::Result<AppState> {
    let generator = SnippetGeneratorBuilder::new()
        .ai_provider(provider)
        .build()?;
    info!(backend = ?config.backend_settings().backend(), "Snippet generator ready.");

    Ok(AppState {
        config: Arc::new(config),
        generator: Arc::new(generator),
        sessions: SessionStore::new(),
    })
}
