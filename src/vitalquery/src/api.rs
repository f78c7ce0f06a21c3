use std::{net::IpAddr, time::Duration};

use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::HealthSnapshot;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const CHAT_PATH: &str = "/chat";
const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("invalid chat base url `{0}`")]
    InvalidBaseUrl(String),
    #[error("failed to build http client")]
    Client(#[source] reqwest::Error),
    #[error("failed to reach chat endpoint")]
    Transport(#[source] reqwest::Error),
    #[error("chat request failed ({status}): {detail}")]
    Status { status: StatusCode, detail: String },
    #[error("invalid chat response")]
    InvalidResponse(#[source] reqwest::Error),
}

impl ChatError {
    /// Text shown to the user when a chat message could not be answered.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Status { detail, .. } => detail.clone(),
            ChatError::Transport(error) if error.is_timeout() => {
                "The chat service took too long to respond. Please try again.".to_owned()
            }
            ChatError::Transport(_) => {
                "Could not reach the chat service. Please check your connection and try again."
                    .to_owned()
            }
            _ => "An error occurred while processing your request.".to_owned(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ChatRequest<'a> {
    pub user_message: &'a str,
    pub session_id: Option<&'a str>,
    pub health_data_snapshot: Option<&'a HealthSnapshot>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub session_id: String,
    pub ai_response: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

impl ErrorBody {
    fn into_detail(self) -> String {
        match self.detail {
            Some(serde_json::Value::String(detail)) => detail,
            Some(serde_json::Value::Null) | None => UNKNOWN_ERROR.to_owned(),
            Some(other) => other.to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ChatConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Client for the remote assistant's `/chat` endpoint. Requests are never retried.
#[derive(Clone, Debug)]
pub struct ChatClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl ChatClient {
    pub fn new(config: ChatConfig) -> Result<Self, ChatError> {
        let base = config.base_url.trim_end_matches('/');
        let endpoint = Url::parse(&format!("{base}{CHAT_PATH}"))
            .map_err(|_| ChatError::InvalidBaseUrl(config.base_url.clone()))?;

        let mut builder = reqwest::Client::builder().timeout(config.timeout);
        if is_loopback(&endpoint) {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(ChatError::Client)?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn send(&self, request: &ChatRequest<'_>) -> Result<ChatReply, ChatError> {
        debug!("sending chat request to {}", self.endpoint);
        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(ChatError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp
                .json::<ErrorBody>()
                .await
                .map(ErrorBody::into_detail)
                .unwrap_or_else(|_| UNKNOWN_ERROR.to_owned());
            error!("chat request failed ({status}): {detail}");
            return Err(ChatError::Status { status, detail });
        }

        resp.json().await.map_err(ChatError::InvalidResponse)
    }
}

fn is_loopback(url: &Url) -> bool {
    match url.host_str() {
        Some(host) if host.eq_ignore_ascii_case("localhost") => true,
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .is_ok_and(|ip| ip.is_loopback()),
        None => false,
    }
}
