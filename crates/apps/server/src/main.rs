mod completions;

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use sync::{ChatReply, ChatRequest};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::completions::{CompletionsConfig, UpstreamError, complete};

#[derive(Clone)]
struct AppState {
    completions: Arc<CompletionsConfig>,
    http: reqwest::Client,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let addr: SocketAddr = env::var("CHAT_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()?;

    let api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
    if api_key.is_empty() {
        warn!("OPENAI_API_KEY is not set; chat requests will fail upstream");
    }

    let completions = CompletionsConfig {
        base_url: env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
        api_key,
        model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
        temperature: env_var_f64("OPENAI_TEMPERATURE", 0.7),
    };

    let state = AppState {
        completions: Arc::new(completions),
        http: reqwest::Client::new(),
    };

    info!(
        "chat server listening on http://{addr} (model {})",
        state.completions.model
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}

fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/chat", post(chat))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, UpstreamError> {
    let content = complete(&state.http, &state.completions, &request).await?;
    Ok(Json(ChatReply {
        content,
        selected_city: request.selected_city,
    }))
}

fn env_var_f64(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};
    use sync::{ChatMessage, ChatRequest};

    use super::{AppState, chat, env_var_f64};
    use crate::completions::{CompletionsConfig, EMPTY_COMPLETION_FALLBACK};

    /// Serves `reply` from a local `/chat/completions` and echoes requests back
    /// in the content so tests can see what was forwarded.
    async fn fake_upstream(reply: Option<Value>, status: StatusCode) -> SocketAddr {
        let router = Router::new().route(
            "/chat/completions",
            post(move |Json(body): Json<Value>| {
                let reply = reply.clone();
                async move {
                    let content = reply.unwrap_or_else(|| Value::String(body.to_string()));
                    (status, Json(json!({"choices": [{"message": {"content": content}}]})))
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });
        addr
    }

    fn state_for(addr: SocketAddr) -> AppState {
        AppState {
            completions: Arc::new(CompletionsConfig {
                base_url: format!("http://{addr}/"),
                api_key: "test-key".into(),
                model: "gpt-3.5-turbo".into(),
                temperature: 0.7,
            }),
            http: reqwest::Client::new(),
        }
    }

    fn request(city: Option<&str>) -> ChatRequest {
        ChatRequest {
            messages: vec![ChatMessage::user("Where should I eat?")],
            selected_city: city.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn forwards_with_system_prompt_and_echoes_city() {
        let addr = fake_upstream(None, StatusCode::OK).await;
        let reply = chat(State(state_for(addr)), Json(request(Some("Lisbon")))).await;
        let Json(reply) = reply.unwrap();
        assert_eq!(reply.selected_city.as_deref(), Some("Lisbon"));

        let forwarded: Value = serde_json::from_str(&reply.content).unwrap();
        assert_eq!(forwarded["model"], "gpt-3.5-turbo");
        assert_eq!(forwarded["temperature"], 0.7);
        assert_eq!(forwarded["messages"][0]["role"], "system");
        assert!(
            forwarded["messages"][0]["content"]
                .as_str()
                .is_some_and(|s| s.contains("the city of Lisbon"))
        );
        assert_eq!(forwarded["messages"][1]["content"], "Where should I eat?");
    }

    #[tokio::test]
    async fn null_content_falls_back() {
        let addr = fake_upstream(Some(Value::Null), StatusCode::OK).await;
        let reply = chat(State(state_for(addr)), Json(request(None))).await;
        let content = reply.ok().map(|Json(r)| r.content);
        assert_eq!(content.as_deref(), Some(EMPTY_COMPLETION_FALLBACK));
    }

    #[tokio::test]
    async fn upstream_failure_is_a_500() {
        let addr = fake_upstream(None, StatusCode::UNAUTHORIZED).await;
        let reply = chat(State(state_for(addr)), Json(request(None))).await;
        let status = reply.into_response().status();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn env_fallback_for_unset_or_bad_values() {
        assert_eq!(env_var_f64("CHAT_SERVER_TEST_UNSET_VAR", 0.7), 0.7);
    }
}
