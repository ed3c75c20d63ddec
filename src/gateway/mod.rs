//! Gateway 应用层
//!
//! HTTP 服务器和请求处理

mod handlers;
mod middleware;
mod state;

pub use state::AppState;

use anyhow::Result;
use axum::{
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::Config;
use crate::providers::GroqProvider;

/// 整体请求超时，需大于上游客户端自身的超时
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

pub async fn serve(config: Config) -> Result<()> {
    let provider = GroqProvider::new(config.groq_api_key.clone(), config.model.clone())?;
    tracing::info!(model = %config.model, "Initialized Groq provider");

    let state = AppState::new(Arc::new(provider));
    let app = build_router(state);
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_metadata))
        .route("/health", get(handlers::handle_health))
        .route("/a2a/story-agent", post(handlers::handle_story))
        .layer(
            ServiceBuilder::new()
                .layer(axum_middleware::from_fn(middleware::request_logger))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
                )),
        )
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    #[cfg(not(unix))]
    tokio::select! {
        _ = ctrl_c => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::StoryProvider;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    /// 测试用 provider，返回固定文本或固定错误
    struct FakeProvider {
        result: std::result::Result<String, String>,
    }

    impl FakeProvider {
        fn story(text: &str) -> AppState {
            AppState::new(Arc::new(Self {
                result: Ok(text.to_string()),
            }))
        }

        fn failing(detail: &str) -> AppState {
            AppState::new(Arc::new(Self {
                result: Err(detail.to_string()),
            }))
        }
    }

    #[async_trait]
    impl StoryProvider for FakeProvider {
        fn name(&self) -> &str {
            "fake"
        }

        async fn generate_story(&self, _phrase: &str) -> Result<String> {
            self.result.clone().map_err(|detail| anyhow!(detail))
        }
    }

    async fn send_json(state: AppState, body: &str) -> (StatusCode, Value) {
        let app = build_router(state);
        let request = Request::builder()
            .method("POST")
            .uri("/a2a/story-agent")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    async fn send_get(state: AppState, uri: &str) -> (StatusCode, Value) {
        let app = build_router(state);
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    #[tokio::test]
    async fn valid_phrase_returns_story_envelope() {
        let state = FakeProvider::story("The robot finally saw the sea.");
        let (status, body) = send_json(
            state,
            r#"{"event":"message_created","message":{"text":"A lonely robot dreams of the ocean"}}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["response_type"], "in_channel");
        assert_eq!(body["data"]["text"], "The robot finally saw the sea.");
    }

    #[tokio::test]
    async fn empty_text_is_rejected_with_400() {
        let state = FakeProvider::story("unused");
        let (status, body) =
            send_json(state, r#"{"event":"message_created","message":{"text":"   "}}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["type"], "validation_error");
    }

    #[tokio::test]
    async fn missing_message_is_rejected_with_400() {
        let state = FakeProvider::story("unused");
        let (status, body) = send_json(state, r#"{"event":"message_created"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["type"], "validation_error");
    }

    #[tokio::test]
    async fn wrong_typed_message_is_rejected_with_400() {
        let state = FakeProvider::story("unused");
        let (status, body) = send_json(
            state,
            r#"{"event":"message_created","message":"not an object"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["type"], "validation_error");
        // serde 细节不回传给调用方
        let message = body["message"].as_str().unwrap();
        assert!(!message.contains("deserialize"));
        assert!(!message.contains("StoryMessage"));
    }

    #[tokio::test]
    async fn malformed_json_is_rejected_with_400() {
        let state = FakeProvider::story("unused");
        let (status, body) = send_json(state, r#"{"event":"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["type"], "validation_error");
    }

    #[tokio::test]
    async fn upstream_failure_returns_500_without_detail() {
        let state = FakeProvider::failing("Groq API error 503: internal backend trace");
        let (status, body) = send_json(
            state,
            r#"{"event":"message_created","message":{"text":"a phrase"}}"#,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["type"], "upstream_error");
        let message = body["message"].as_str().unwrap();
        assert!(!message.contains("backend trace"));
        assert!(!message.contains("503"));
    }

    #[tokio::test]
    async fn long_story_is_truncated_to_word_bound() {
        let long: String = std::iter::repeat("word")
            .take(400)
            .collect::<Vec<_>>()
            .join(" ");
        let state = FakeProvider::story(&long);
        let (status, body) = send_json(
            state,
            r#"{"event":"message_created","message":{"text":"a phrase"}}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let text = body["data"]["text"].as_str().unwrap();
        assert_eq!(text.split_whitespace().count(), 250);
    }

    #[tokio::test]
    async fn health_returns_fixed_payload() {
        let (status, body) = send_get(FakeProvider::story("unused"), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn metadata_is_schema_stable() {
        let (status, first) = send_get(FakeProvider::story("unused"), "/").await;
        let (_, second) = send_get(FakeProvider::story("unused"), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(first, second);
        assert_eq!(first["name"], "Story Agent");
        assert_eq!(first["a2a"]["endpoints"][0]["path"], "/a2a/story-agent");
        assert_eq!(first["health_url"], "/health");
    }
}
