//! 应用配置模块
//!
//! 负责从环境变量加载应用配置，包括：
//! - 服务器监听地址和端口
//! - Groq API 凭证
//! - 上游模型标识

use anyhow::{Context, Result};

/// 默认的 Groq 模型
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

/// 应用配置
///
/// 进程启动时加载一次，之后视为不可变
#[derive(Debug, Clone)]
pub struct Config {
    /// 服务器监听地址（如 "0.0.0.0" 或 "127.0.0.1"）
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
    /// Groq API 凭证
    pub groq_api_key: String,
    /// 上游模型标识
    pub model: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// # 环境变量
    ///
    /// - `GROQ_API_KEY`: Groq API 凭证（**必需**）
    /// - `PORT`: 服务器监听端口（默认: 3000）
    /// - `STORY_AGENT_HOST`: 服务器监听地址（默认: "0.0.0.0"）
    /// - `STORY_AGENT_MODEL`: 上游模型标识（默认: "llama-3.1-8b-instant"）
    ///
    /// # 错误
    ///
    /// - 如果 `GROQ_API_KEY` 未设置
    /// - 如果 `PORT` 不是有效的端口号
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("STORY_AGENT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid port number")?;

        let groq_api_key = std::env::var("GROQ_API_KEY")
            .context("GROQ_API_KEY environment variable is required")?;

        let model = std::env::var("STORY_AGENT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            host,
            port,
            groq_api_key,
            model,
        })
    }
}
