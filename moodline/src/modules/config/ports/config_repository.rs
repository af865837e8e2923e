use async_trait::async_trait;
use thiserror::Error;

use crate::modules::config::domain::AppConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Validation error: {}", errors.join("; "))]
    ValidationError { errors: Vec<String> },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::SerializationError(err.to_string())
    }
}

/// moodline 设置的存储位置
///
/// 未保存过设置时 `load` 返回默认值，而不是报错
#[async_trait]
pub trait ConfigRepository: Send + Sync {
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// 删除已保存的设置，之后 `load` 回到默认值
    async fn clear(&self) -> Result<(), ConfigError>;

    async fn exists(&self) -> Result<bool, ConfigError>;

    /// 用于日志的存储位置描述
    fn location(&self) -> String;
}
