//! Client for the external agent runtime.

use crate::config::RelaySettings;
use crate::error::{Result, TripmateError};
use crate::http::{create_client, join_url};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// The agent runtime as seen by the relay.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Register a conversation identifier.
    async fn create_session(&self, session_id: &str) -> Result<()>;

    /// Send one user message; returns the raw reply (expected: array of turns).
    async fn run(&self, session_id: &str, message: &str) -> Result<Value>;
}

/// Body of `POST /run`.
#[derive(Debug, Serialize)]
pub struct RunRequest<'a> {
    pub app_name: &'a str,
    pub user_id: &'a str,
    pub session_id: &'a str,
    pub new_message: NewMessage<'a>,
}

#[derive(Debug, Serialize)]
pub struct NewMessage<'a> {
    pub role: &'a str,
    pub parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
pub struct TextPart<'a> {
    pub text: &'a str,
}

impl<'a> RunRequest<'a> {
    pub fn user_text(app_name: &'a str, user_id: &'a str, session_id: &'a str, text: &'a str) -> Self {
        Self {
            app_name,
            user_id,
            session_id,
            new_message: NewMessage {
                role: "user",
                parts: vec![TextPart { text }],
            },
        }
    }
}

/// HTTP implementation of [`AgentRuntime`].
pub struct HttpAgentRuntime {
    client: reqwest::Client,
    base_url: String,
    app_name: String,
    user_id: String,
    session_timeout: Duration,
}

impl HttpAgentRuntime {
    pub fn new(settings: &RelaySettings) -> Result<Self> {
        Ok(Self {
            client: create_client(Duration::from_secs(settings.run_timeout_secs))?,
            base_url: settings.agent_server_url.clone(),
            app_name: settings.app_name.clone(),
            user_id: settings.user_id.clone(),
            session_timeout: Duration::from_secs(settings.session_timeout_secs),
        })
    }

    /// `{base}/apps/{app}/users/{user}/sessions/{id}`, each segment percent-encoded.
    fn session_url(&self, session_id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| {
                TripmateError::Config(format!(
                    "Agent server URL cannot carry a path: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend([
                "apps",
                self.app_name.as_str(),
                "users",
                self.user_id.as_str(),
                "sessions",
                session_id,
            ]);
        Ok(url)
    }

    /// Whether the runtime answers at all (any HTTP status counts).
    pub async fn ping(&self) -> bool {
        self.client
            .get(&self.base_url)
            .timeout(self.session_timeout)
            .send()
            .await
            .is_ok()
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TripmateError::AgentRuntimeStatus {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl AgentRuntime for HttpAgentRuntime {
    async fn create_session(&self, session_id: &str) -> Result<()> {
        let response = self
            .client
            .post(self.session_url(session_id)?)
            .timeout(self.session_timeout)
            .json(&json!({}))
            .send()
            .await?;
        check_status(response).await?;
        debug!("Registered session {}", session_id);
        Ok(())
    }

    async fn run(&self, session_id: &str, message: &str) -> Result<Value> {
        let request = RunRequest::user_text(&self.app_name, &self.user_id, session_id, message);
        let response = self
            .client
            .post(join_url(&self.base_url, "run"))
            .json(&request)
            .send()
            .await?;
        let reply: Value = check_status(response).await?.json().await.map_err(|e| {
            TripmateError::AgentRuntime(format!("Malformed reply from agent runtime: {}", e))
        })?;
        debug!("Agent runtime reply: {}", reply);
        Ok(reply)
    }
}
