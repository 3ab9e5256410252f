//! # Backend Settings Tests
//!
//! `BackendSettings::from_env` reads process-wide state, so every test here is
//! serialized and restores the variables it touches.

use quickabout::{
    providers::factory::{create_provider, Backend, BackendSettings},
    GenerationError,
};
use serial_test::serial;
use std::env;

const VARS: [&str; 7] = [
    "USE_OPEN_BACKEND",
    "OPENAI_API_URL",
    "OPENAI_API_KEY",
    "OPENAI_MODEL",
    "HF_API_URL",
    "HF_API_TOKEN",
    "HF_MODEL",
];

/// Clears every backend variable, runs `f`, then restores the old values.
fn with_clean_env<F: FnOnce()>(f: F) {
    let saved: Vec<(&str, Option<String>)> =
        VARS.iter().map(|key| (*key, env::var(key).ok())).collect();
    for key in VARS {
        env::remove_var(key);
    }

    f();

    for (key, value) in saved {
        match value {
            Some(v) => env::set_var(key, v),
            None => env::remove_var(key),
        }
    }
}

#[test]
#[serial]
fn test_from_env_defaults() {
    with_clean_env(|| {
        let settings = BackendSettings::from_env();
        assert_eq!(settings, BackendSettings::default());
        assert_eq!(settings.backend(), Backend::OpenAi);
        assert_eq!(
            settings.openai_api_url,
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(settings.openai_model, "gpt-4-turbo");
    });
}

#[test]
#[serial]
fn test_from_env_reads_open_backend_settings() {
    with_clean_env(|| {
        env::set_var("USE_OPEN_BACKEND", "true");
        env::set_var("HF_API_TOKEN", "hf-secret");
        env::set_var("HF_MODEL", "tiiuae/falcon-7b-instruct");

        let settings = BackendSettings::from_env();

        assert_eq!(settings.backend(), Backend::HuggingFace);
        assert_eq!(settings.hf_api_token.as_deref(), Some("hf-secret"));
        assert_eq!(settings.hf_model, "tiiuae/falcon-7b-instruct");
        assert!(settings.hf_api_url.is_none());
        assert!(create_provider(&settings).is_ok());
    });
}

#[test]
#[serial]
fn test_from_env_treats_empty_values_as_unset() {
    with_clean_env(|| {
        env::set_var("OPENAI_API_KEY", "   ");
        env::set_var("OPENAI_MODEL", "");
        env::set_var("USE_OPEN_BACKEND", "");

        let settings = BackendSettings::from_env();

        assert!(settings.openai_api_key.is_none());
        assert_eq!(settings.openai_model, "gpt-4-turbo");
        assert!(!settings.use_open_backend);
        assert!(matches!(
            create_provider(&settings),
            Err(GenerationError::MissingApiKey(_))
        ));
    });
}

#[test]
#[serial]
fn test_from_env_hosted_backend_with_key() {
    with_clean_env(|| {
        env::set_var("USE_OPEN_BACKEND", "0");
        env::set_var("OPENAI_API_KEY", "sk-live");
        env::set_var("OPENAI_API_URL", "http://localhost:9999/v1/chat/completions");

        let settings = BackendSettings::from_env();

        assert_eq!(settings.backend(), Backend::OpenAi);
        assert_eq!(settings.openai_api_key.as_deref(), Some("sk-live"));
        assert_eq!(
            settings.openai_api_url,
            "http://localhost:9999/v1/chat/completions"
        );
        assert!(create_provider(&settings).is_ok());
    });
}
