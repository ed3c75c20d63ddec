//! Provider 抽象层
//!
//! 定义上游故事生成服务的统一接口

pub mod groq;

use anyhow::Result;
use async_trait::async_trait;

pub use groq::GroqProvider;

/// StoryProvider Trait - 上游故事生成服务的统一接口
///
/// 每次请求对应一次同步的上游调用，没有重试、没有流式响应。
#[async_trait]
pub trait StoryProvider: Send + Sync {
    /// Provider 名称（用于日志和标识）
    fn name(&self) -> &str;

    /// 根据输入短语生成一篇短故事
    ///
    /// 返回上游模型生成的故事文本。网络错误、非 2xx 响应或
    /// 响应体缺少 completion 内容均视为上游失败。
    async fn generate_story(&self, phrase: &str) -> Result<String>;
}
