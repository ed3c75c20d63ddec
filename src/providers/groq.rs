//! Groq Provider
//!
//! 调用 Groq 的 OpenAI 兼容 chat-completion API，使用固定的
//! prompt 模板与生成参数

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::providers::StoryProvider;

/// Groq API 基础地址
const GROQ_BASE_URL: &str = "https://api.groq.com";

/// chat-completion 路径（OpenAI 兼容）
const CHAT_COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";

/// API 请求超时（秒）
const API_TIMEOUT_SECS: u64 = 30;

/// 固定的生成温度
const TEMPERATURE: f64 = 0.7;

/// 生成 token 上限（约 250 词的故事足够）
const MAX_TOKENS: u32 = 400;

/// 构造故事生成 prompt
///
/// 250 词的软限制通过 prompt 传达给模型，
/// 硬截断由 gateway 层兜底。
fn story_prompt(phrase: &str) -> String {
    format!("Write a short story (under 250 words) based on: '{}'", phrase)
}

/// chat-completion 请求体
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// chat-completion 响应体（只解析需要的字段）
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Groq chat-completion Provider
pub struct GroqProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GroqProvider {
    pub fn new(api_key: String, model: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(API_TIMEOUT_SECS))
            .build()
            .context("Failed to create Groq API client")?;

        Ok(Self {
            client,
            api_key,
            model,
            base_url: GROQ_BASE_URL.to_string(),
        })
    }

    /// 覆盖基础地址（测试时指向 mock 服务器）
    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    async fn chat_completion(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = format!("{}{}", self.base_url, CHAT_COMPLETIONS_PATH);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .context("Failed to send request to Groq API")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Groq API error {}: {}", status, error_body);
        }

        response
            .json()
            .await
            .context("Failed to parse Groq API response")
    }
}

#[async_trait]
impl StoryProvider for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    async fn generate_story(&self, phrase: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: story_prompt(phrase),
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self.chat_completion(&request).await?;

        let story = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .context("Groq response contains no completion text")?;

        Ok(story.to_string())
    }
}
