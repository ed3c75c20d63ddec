//! Gateway 应用状态

use std::sync::Arc;

use crate::providers::StoryProvider;

/// Gateway 应用状态
///
/// 只持有上游 provider 的共享句柄，请求之间没有其他共享可变状态
#[derive(Clone)]
pub struct AppState {
    provider: Arc<dyn StoryProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn StoryProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &dyn StoryProvider {
        self.provider.as_ref()
    }
}
