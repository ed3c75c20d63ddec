//! Metadata 和健康检查处理器

use axum::Json;
use serde_json::{json, Value};

/// GET /
///
/// 返回固定的 agent 描述文档，Telex 平台注册 agent 时读取。
/// 字段结构保持稳定，每次调用返回相同的 shape。
pub async fn handle_metadata() -> Json<Value> {
    Json(json!({
        "name": "Story Agent",
        "description": "Takes in a phrase and returns a short (less than 250-word) story.",
        "version": env!("CARGO_PKG_VERSION"),
        "framework": "Axum",
        "provider": "Groq",
        "a2a": {
            "endpoints": [
                {
                    "name": "Story Generator",
                    "path": "/a2a/story-agent",
                    "method": "POST"
                }
            ]
        },
        "health_url": "/health"
    }))
}

/// GET /health
///
/// 固定返回 `{"status":"ok"}`，不探测上游可用性
pub async fn handle_health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
