//! Client for an OpenAI-compatible `/chat/completions` endpoint.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use sync::{ChatMessage, ChatRequest};
use tracing::error;

/// Returned when the model produced no text.
pub const EMPTY_COMPLETION_FALLBACK: &str = "Sorry, I could not generate a response.";

#[derive(Clone, Debug)]
pub struct CompletionsConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f64,
}

#[derive(Debug)]
pub enum UpstreamError {
    Transport(reqwest::Error),
    Status { status: u16, body: String },
    Decode(reqwest::Error),
}

impl std::fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpstreamError::Transport(err) => write!(f, "completion request failed: {err}"),
            UpstreamError::Status { status, body } => {
                write!(f, "completion endpoint returned {status}: {body}")
            }
            UpstreamError::Decode(err) => write!(f, "completion response undecodable: {err}"),
        }
    }
}

impl std::error::Error for UpstreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UpstreamError::Transport(err) | UpstreamError::Decode(err) => Some(err),
            UpstreamError::Status { .. } => None,
        }
    }
}

impl IntoResponse for UpstreamError {
    fn into_response(self) -> Response {
        error!("chat API error: {self}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Error processing chat request",
        )
            .into_response()
    }
}

#[derive(Debug, Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl CompletionResponse {
    fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|c| !c.is_empty())
    }
}

/// Runs one completion for `request`, falling back to a fixed apology when the
/// model returns no text.
pub async fn complete(
    http: &reqwest::Client,
    config: &CompletionsConfig,
    request: &ChatRequest,
) -> Result<String, UpstreamError> {
    let url = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
    let body = CompletionBody {
        model: &config.model,
        messages: request.to_completion_messages(),
        temperature: config.temperature,
    };

    let response = http
        .post(url)
        .bearer_auth(&config.api_key)
        .json(&body)
        .send()
        .await
        .map_err(UpstreamError::Transport)?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(UpstreamError::Status { status, body });
    }

    let parsed: CompletionResponse = response.json().await.map_err(UpstreamError::Decode)?;
    Ok(parsed
        .first_content()
        .unwrap_or_else(|| EMPTY_COMPLETION_FALLBACK.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{CompletionBody, CompletionResponse, UpstreamError};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use sync::ChatMessage;

    #[test]
    fn body_serializes_like_the_completions_api() {
        let body = CompletionBody {
            model: "gpt-3.5-turbo",
            messages: vec![ChatMessage::system("be brief"), ChatMessage::user("hi")],
            temperature: 0.7,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "gpt-3.5-turbo",
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "hi"}
                ],
                "temperature": 0.7
            })
        );
    }

    #[test]
    fn takes_the_first_choice() {
        let parsed: Result<CompletionResponse, _> = serde_json::from_str(
            r#"{"choices":[{"message":{"content":"one"}},{"message":{"content":"two"}}]}"#,
        );
        assert_eq!(parsed.ok().and_then(|p| p.first_content()), Some("one".into()));
    }

    #[test]
    fn missing_or_empty_content_has_no_text() {
        for raw in [
            r#"{"choices":[]}"#,
            r#"{}"#,
            r#"{"choices":[{"message":{"content":null}}]}"#,
            r#"{"choices":[{"message":{"content":""}}]}"#,
            r#"{"choices":[{}]}"#,
        ] {
            let parsed: Result<CompletionResponse, _> = serde_json::from_str(raw);
            assert!(parsed.is_ok(), "{raw}");
            assert_eq!(parsed.ok().and_then(|p| p.first_content()), None, "{raw}");
        }
    }

    #[test]
    fn upstream_errors_become_a_500() {
        let err = UpstreamError::Status {
            status: 401,
            body: "bad key".into(),
        };
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
