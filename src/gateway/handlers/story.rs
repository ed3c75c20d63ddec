//! Story 路由处理器
//!
//! 服务唯一的业务端点：校验 Telex payload、调用上游 provider、
//! 将故事文本包进固定的响应 envelope

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::gateway::handlers::AgentError;
use crate::gateway::state::AppState;
use crate::utils::{truncate_words, word_count};

/// 故事词数硬上限
///
/// prompt 里向模型传达同样的软限制，这里在服务端兜底截断
const MAX_STORY_WORDS: usize = 250;

/// Telex 下发的消息 payload
///
/// 字段在反序列化层面全部宽容处理，校验在 handler 中进行，
/// 这样缺字段的请求能得到 400 而不是提取器的 422
#[derive(Debug, Deserialize)]
pub struct StoryRequest {
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub message: Option<StoryMessage>,
}

#[derive(Debug, Deserialize)]
pub struct StoryMessage {
    #[serde(default)]
    pub text: String,
}

/// Telex 期望的响应 envelope
#[derive(Debug, Serialize)]
pub struct StoryResponse {
    pub data: StoryData,
}

#[derive(Debug, Serialize)]
pub struct StoryData {
    pub response_type: &'static str,
    pub text: String,
}

impl StoryResponse {
    pub fn in_channel(text: String) -> Self {
        Self {
            data: StoryData {
                response_type: "in_channel",
                text,
            },
        }
    }
}

/// POST /a2a/story-agent 处理器
pub async fn handle_story(
    State(state): State<AppState>,
    body: Result<Json<StoryRequest>, JsonRejection>,
) -> Result<Json<StoryResponse>, AgentError> {
    // 提取器的拒绝（语法错误、字段类型不符）统一映射为 400，
    // serde 细节只进日志
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!("payload rejected: {}", rejection);
        AgentError::Validation("request body must be a valid Telex message payload".to_string())
    })?;

    let phrase = body
        .message
        .as_ref()
        .map(|m| m.text.trim())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| {
            AgentError::Validation("message.text must be a non-empty string".to_string())
        })?;

    let provider = state.provider();

    tracing::info!(
        provider = provider.name(),
        event = %body.event,
        phrase_words = word_count(phrase),
        "request"
    );

    let story = provider
        .generate_story(phrase)
        .await
        .map_err(AgentError::Upstream)?;

    let words = word_count(&story);
    let story = if words > MAX_STORY_WORDS {
        tracing::warn!(words, limit = MAX_STORY_WORDS, "story truncated");
        truncate_words(&story, MAX_STORY_WORDS)
    } else {
        story
    };

    tracing::info!(provider = provider.name(), story_words = word_count(&story), "response");

    Ok(Json(StoryResponse::in_channel(story)))
}
