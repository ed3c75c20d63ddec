//! Story Agent - Telex A2A 短篇故事生成服务
//!
//! 一个单一职责的 HTTP 服务：接收一个短语，调用 Groq 的
//! chat-completion API 生成一篇短故事，并以 Telex 平台期望的
//! 固定 JSON envelope 返回。
//!
//! # 功能特性
//!
//! - Telex A2A 路由（metadata / health / story）
//! - Groq 上游调用，固定 prompt 模板与生成参数
//! - 250 词上限的服务端兜底截断
//! - 请求级日志与优雅关闭
//!
//! # 命令行接口
//!
//! - `serve`: 启动 HTTP 服务器
//! - `test`: 向本地服务器发送测试请求

mod commands;
mod config;
mod gateway;
mod providers;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Story Agent CLI
#[derive(Parser)]
#[command(name = "story-agent")]
#[command(about = "Telex Story Agent Service", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// 可用的命令
#[derive(Subcommand)]
enum Commands {
    /// 启动 HTTP 服务器
    Serve,
    /// 向本地服务器发送测试请求
    Test,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 加载 .env 文件（如果存在）
    if let Ok(dotenv_path) = std::env::var("STORY_AGENT_ENV_FILE") {
        dotenvy::from_path(&dotenv_path).ok();
    } else {
        dotenvy::dotenv().ok();
    }

    // 初始化日志系统
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "story_agent=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    // 解析命令行参数和配置
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // 执行相应的命令
    match cli.command {
        Commands::Serve => commands::serve_command(config).await,
        Commands::Test => commands::test_command(config).await,
    }
}
