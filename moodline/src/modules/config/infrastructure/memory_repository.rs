use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::modules::config::domain::AppConfig;
use crate::modules::config::ports::{ConfigError, ConfigRepository};

/// 内存配置仓储（用于测试）
#[derive(Default)]
pub struct InMemoryConfigRepository {
    saved: RwLock<Option<AppConfig>>,
}

impl InMemoryConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            saved: RwLock::new(Some(config)),
        }
    }
}

#[async_trait]
impl ConfigRepository for InMemoryConfigRepository {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        Ok(self.saved.read().await.clone().unwrap_or_default())
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        *self.saved.write().await = Some(config.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), ConfigError> {
        self.saved.write().await.take();
        Ok(())
    }

    async fn exists(&self) -> Result<bool, ConfigError> {
        Ok(self.saved.read().await.is_some())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
