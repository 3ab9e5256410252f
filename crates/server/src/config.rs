//! # Application Configuration
//!
//! This module defines the configuration structure for the `quickabout-server` and
//! provides the logic for loading it from a `config.yml` file and environment
//! variables.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use quickabout::providers::{
    ai::{
        huggingface::DEFAULT_HF_MODEL,
        openai::{DEFAULT_OPENAI_API_URL, DEFAULT_OPENAI_MODEL},
    },
    factory::{parse_flag, BackendSettings},
};
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::env;
use std::fs;
use tracing::info;

/// The JWT secret used when none is configured. Only suitable for local use.
pub const DEFAULT_JWT_SECRET: &str = "quickabout-development-secret";

/// Upper bound for `session_minutes` (one year).
pub const MAX_SESSION_MINUTES: i64 = 60 * 24 * 365;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Selects the open inference backend. Loaded from `USE_OPEN_BACKEND`.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub use_open_backend: bool,
    #[serde(default = "default_openai_api_url")]
    pub openai_api_url: String,
    #[serde(default, deserialize_with = "deserialize_optional")]
    pub openai_api_key: Option<String>,
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    #[serde(default, deserialize_with = "deserialize_optional")]
    pub hf_api_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional")]
    pub hf_api_token: Option<String>,
    #[serde(default = "default_hf_model")]
    pub hf_model: String,
    /// The single operator account. Login is refused while either is unset.
    #[serde(default, deserialize_with = "deserialize_optional")]
    pub login_username: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional")]
    pub login_password: Option<String>,
    /// The HS256 key for session tokens. Loaded from `JWT_SECRET`.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// How long a login stays valid. Loaded from `SESSION_MINUTES`.
    #[serde(default = "default_session_minutes")]
    pub session_minutes: i64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("use_open_backend", &self.use_open_backend)
            .field("openai_api_url", &self.openai_api_url)
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("openai_model", &self.openai_model)
            .field("hf_api_url", &self.hf_api_url)
            .field("hf_api_token", &self.hf_api_token.as_ref().map(|_| "[REDACTED]"))
            .field("hf_model", &self.hf_model)
            .field("login_username", &self.login_username)
            .field("login_password", &self.login_password.as_ref().map(|_| "[REDACTED]"))
            .field("session_minutes", &self.session_minutes)
            .finish()
    }
}

impl AppConfig {
    /// The subset of the configuration needed to build a completion backend.
    pub fn backend_settings(&self) -> BackendSettings {
        BackendSettings {
            use_open_backend: self.use_open_backend,
            openai_api_url: self.openai_api_url.clone(),
            openai_api_key: self.openai_api_key.clone(),
            openai_model: self.openai_model.clone(),
            hf_api_url: self.hf_api_url.clone(),
            hf_api_token: self.hf_api_token.clone(),
            hf_model: self.hf_model.clone(),
        }
    }

    /// The session lifetime as a `chrono` duration.
    ///
    /// `get_config` rejects out-of-range values; a hand-built config that
    /// skipped it falls back to the default lifetime.
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::try_minutes(self.session_minutes)
            .filter(|_| (1..=MAX_SESSION_MINUTES).contains(&self.session_minutes))
            .unwrap_or_else(|| chrono::Duration::minutes(default_session_minutes()))
    }
}

/// Provides a default value for the `port` field if not set in the environment.
fn default_port() -> u16 {
    8501
}

fn default_openai_api_url() -> String {
    DEFAULT_OPENAI_API_URL.to_string()
}

fn default_openai_model() -> String {
    DEFAULT_OPENAI_MODEL.to_string()
}

fn default_hf_model() -> String {
    DEFAULT_HF_MODEL.to_string()
}

fn default_jwt_secret() -> String {
    DEFAULT_JWT_SECRET.to_string()
}

fn default_session_minutes() -> i64 {
    30
}

/// Accepts booleans as well as the strings `1/true/yes/on` coming from the environment.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Int(value) => value != 0,
        Flag::Text(text) => parse_flag(&text),
    })
}

/// Treats empty strings (e.g. an unset `${VAR}` in the YAML) as absent.
fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(format!("Invalid substitution pattern: {e}")))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// Layers, lowest precedence first:
/// - the defaults on `AppConfig`,
/// - `config.yml` next to this crate, or the file at `config_path_override`,
///   with `${VAR}` placeholders substituted from the environment,
/// - environment variables named after the keys (`PORT`, `OPENAI_API_KEY`, ...).
///
/// The default `config.yml` is optional; an explicit override that does not
/// exist is an error.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder();

    match config_path_override {
        Some(override_path) => {
            let content = read_and_substitute(override_path)?.ok_or_else(|| {
                ConfigError::NotFound(format!("Config file not found at '{override_path}'."))
            })?;
            info!("Loading configuration from '{override_path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None => {
            let user_config_path = format!("{base_path}/config.yml");
            if let Some(content) = read_and_substitute(&user_config_path)? {
                info!("Loading user-defined configuration from '{user_config_path}'.");
                builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
            } else {
                info!("'{user_config_path}' not found. Using defaults and environment only.");
            }
        }
    }

    let settings = builder
        .add_source(Environment::default())
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    if !(1..=MAX_SESSION_MINUTES).contains(&config.session_minutes) {
        return Err(ConfigError::General(format!(
            "session_minutes must be between 1 and {MAX_SESSION_MINUTES}, got {}",
            config.session_minutes
        )));
    }
    Ok(config)
}
