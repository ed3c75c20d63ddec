//! HTTP 请求处理器

pub mod meta;
pub mod story;

pub use meta::{handle_health, handle_metadata};
pub use story::handle_story;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// Agent 错误分类
///
/// - `Validation`: 请求体缺失或非法，用户可自行纠正，映射为 400
/// - `Upstream`: 上游调用失败（网络错误 / 非 2xx / 响应体异常），
///   映射为 500，细节只进日志，不回传给调用方
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("{0}")]
    Validation(String),
    #[error("upstream provider failure")]
    Upstream(#[source] anyhow::Error),
}

/// 错误响应体
#[derive(Serialize)]
struct ErrorResponse {
    #[serde(rename = "type")]
    error_type: &'static str,
    message: String,
}

impl IntoResponse for AgentError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            AgentError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error_type: "validation_error",
                    message,
                },
            ),
            AgentError::Upstream(source) => {
                tracing::error!("upstream failure: {:#}", source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error_type: "upstream_error",
                        message: "Story generation failed. Please try again later.".to_string(),
                    },
                )
            }
        };

        (status, Json(error)).into_response()
    }
}
