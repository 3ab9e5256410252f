//! # Common Test Utilities
//!
//! This module centralizes the test harness used across the `quickabout-server`
//! integration tests. `TestApp` spawns a real server on a random port, configured
//! either against an `httpmock::MockServer` posing as the chat-completion backend,
//! or with an in-process `MockAiProvider`.

// Allow unused code because this is a test utility module, and not all
// functions might be used by every test file that includes it.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use httpmock::{Method, Mock, MockServer};
use quickabout_server::{
    config::{self, AppConfig},
    router,
    state::{build_app_state, build_app_state_with_provider, AppState},
};
use quickabout_test_utils::MockAiProvider;
use reqwest::{Client, Response};
use serde_json::{json, Value};
use std::{fs::File, io::Write, net::SocketAddr};
use tempfile::{tempdir, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};

pub const TEST_USERNAME: &str = "admin";
pub const TEST_PASSWORD: &str = "correct-horse";
pub const TEST_JWT_SECRET: &str = "test-jwt-secret";
pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

// --- Full Application Test Harness ---

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub app_state: AppState,
    _config_dir: Option<TempDir>,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

/// Writes a `config.yml` for the test into `dir` and loads it through `get_config`.
fn load_test_config(dir: &TempDir, mock_server: &MockServer, session_minutes: i64) -> Result<AppConfig> {
    let config_path = dir.path().join("config.yml");
    let config_content = format!(
        r#"
port: 0
use_open_backend: false
openai_api_url: "{}"
openai_api_key: "test-openai-key"
openai_model: "mock-chat-model"
login_username: "{TEST_USERNAME}"
login_password: "{TEST_PASSWORD}"
jwt_secret: "{TEST_JWT_SECRET}"
session_minutes: {session_minutes}
"#,
        mock_server.url(COMPLETIONS_PATH),
    );
    let mut file = File::create(&config_path)?;
    file.write_all(config_content.as_bytes())?;

    let path = config_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("temp path is not valid UTF-8"))?;
    Ok(config::get_config(Some(path))?)
}

impl TestApp {
    /// Spawns the server with the real HTTP backend pointed at `mock_server`.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with_session_minutes(30).await
    }

    pub async fn spawn_with_session_minutes(session_minutes: i64) -> Result<Self> {
        let mock_server = MockServer::start();
        let config_dir = tempdir()?;
        let config = load_test_config(&config_dir, &mock_server, session_minutes)?;
        let app_state = build_app_state(config)?;

        let mut app = TestApp::spawn_with_state(app_state, mock_server).await?;
        app._config_dir = Some(config_dir);
        Ok(app)
    }

    /// Spawns the server around an in-process mock provider.
    pub async fn spawn_with_provider(provider: MockAiProvider) -> Result<Self> {
        let mock_server = MockServer::start();
        let config_dir = tempdir()?;
        let config = load_test_config(&config_dir, &mock_server, 30)?;
        let app_state = build_app_state_with_provider(config, Box::new(provider))?;

        let mut app = TestApp::spawn_with_state(app_state, mock_server).await?;
        app._config_dir = Some(config_dir);
        Ok(app)
    }

    pub async fn spawn_with_state(app_state: AppState, mock_server: MockServer) -> Result<Self> {
        dotenvy::dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            app_state: app_state_for_harness,
            _config_dir: None,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.address)
    }

    /// Logs in with the configured operator account and returns the bearer token.
    pub async fn login(&self) -> Result<String> {
        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({ "username": TEST_USERNAME, "password": TEST_PASSWORD }))
            .send()
            .await?;
        anyhow::ensure!(
            response.status().is_success(),
            "login failed with status {}",
            response.status()
        );
        let body: Value = response.json().await?;
        body["result"]["token"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("login response has no token: {body}"))
    }

    pub async fn generate(&self, token: &str, text: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/generate"))
            .bearer_auth(token)
            .json(&json!({ "text": text }))
            .send()
            .await?)
    }

    pub async fn get_with_token(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Mocks the FAQ extraction call on the HTTP backend.
    pub fn mock_faq_reply(&self, content: &str) -> Mock<'_> {
        let reply = completion_body(content);
        self.mock_server.mock(|when, then| {
            when.method(Method::POST)
                .path(COMPLETIONS_PATH)
                .body_contains("extract up to 5 FAQs");
            then.status(200).json_body(reply);
        })
    }

    /// Mocks the body formatting call on the HTTP backend.
    pub fn mock_body_reply(&self, content: &str) -> Mock<'_> {
        let reply = completion_body(content);
        self.mock_server.mock(|when, then| {
            when.method(Method::POST)
                .path(COMPLETIONS_PATH)
                .body_contains("Output only the body sections");
            then.status(200).json_body(reply);
        })
    }
}

/// A chat-completion response carrying `content` as the assistant message.
pub fn completion_body(content: &str) -> Value {
    json!({"choices": [{"message": {"role": "assistant", "content": content}}]})
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
