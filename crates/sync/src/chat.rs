//! Chat collaborator seam.
//!
//! The orchestrator never talks to a language model directly. It hands a
//! [`ChatRequest`] to a [`ChatCollaborator`] and feeds the outcome back through
//! `on_reply_result`. [`HttpChatCollaborator`] is the production implementation,
//! posting to the chat forwarder's `/api/chat` route.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::prompt::system_prompt;

/// Boxed future returned by dyn-compatible async traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// Wire body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(rename = "selectedCity", default)]
    pub selected_city: Option<String>,
}

impl ChatRequest {
    /// The conversation as sent to a completion model: system prompt first.
    pub fn to_completion_messages(&self) -> Vec<ChatMessage> {
        let mut out = Vec::with_capacity(self.messages.len() + 1);
        out.push(ChatMessage::system(system_prompt(
            self.selected_city.as_deref(),
        )));
        out.extend(self.messages.iter().cloned());
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub content: String,
    #[serde(rename = "selectedCity", default)]
    pub selected_city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// The request never produced an HTTP response.
    Transport(String),
    /// Non-success HTTP status.
    Status(u16),
    /// The response carried no usable content.
    MissingContent,
    Decode(String),
}

impl std::fmt::Display for ChatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatError::Transport(msg) => write!(f, "chat transport failed: {msg}"),
            ChatError::Status(code) => write!(f, "chat endpoint returned status {code}"),
            ChatError::MissingContent => write!(f, "chat reply had no content"),
            ChatError::Decode(msg) => write!(f, "chat reply could not be decoded: {msg}"),
        }
    }
}

impl std::error::Error for ChatError {}

/// Anything that can answer a chat request.
///
/// Implementations must be `Send + Sync`; the method returns a boxed future
/// so the trait stays dyn-compatible.
pub trait ChatCollaborator: Send + Sync {
    fn send<'a>(&'a self, request: &'a ChatRequest) -> BoxFuture<'a, Result<ChatReply, ChatError>>;
}

/// Reply body as it may arrive: `content` can be absent or null.
#[derive(Debug, Deserialize)]
struct ReplyBody {
    content: Option<String>,
    #[serde(rename = "selectedCity", default)]
    selected_city: Option<String>,
}

impl ReplyBody {
    fn into_reply(self) -> Result<ChatReply, ChatError> {
        match self.content {
            Some(content) if !content.trim().is_empty() => Ok(ChatReply {
                content,
                selected_city: self.selected_city,
            }),
            _ => Err(ChatError::MissingContent),
        }
    }
}

/// Decodes a raw `/api/chat` response body.
pub fn decode_reply(body: &str) -> Result<ChatReply, ChatError> {
    let parsed: ReplyBody =
        serde_json::from_str(body).map_err(|e| ChatError::Decode(e.to_string()))?;
    parsed.into_reply()
}

/// Posts requests to a chat forwarder over HTTP.
#[derive(Debug, Clone)]
pub struct HttpChatCollaborator {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpChatCollaborator {
    /// `base_url` is the forwarder's origin, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            endpoint: format!("{}/api/chat", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;
        decode_reply(&body)
    }
}

impl ChatCollaborator for HttpChatCollaborator {
    fn send<'a>(&'a self, request: &'a ChatRequest) -> BoxFuture<'a, Result<ChatReply, ChatError>> {
        Box::pin(self.post(request))
    }
}
