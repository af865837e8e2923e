// Config Module
//
// 配置管理模块：
// - domain: 配置实体、部分更新与校验规则
// - ports: 配置仓储端口与错误类型
// - infrastructure: JSON 文件与内存仓储

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{
    AnalysisConfig, AppConfig, PartialAnalysisConfig, PartialAppConfig, PartialClassifierConfig,
};

pub use ports::{ConfigError, ConfigRepository};

pub use infrastructure::{FileConfigRepository, InMemoryConfigRepository, DEFAULT_CONFIG_FILE};

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Config 模块容器
pub struct ConfigModule {
    repository: Arc<dyn ConfigRepository>,
}

impl ConfigModule {
    /// 使用内存仓储创建（用于测试）
    pub fn new_in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryConfigRepository::new()))
    }

    /// 使用 JSON 文件创建，文件不存在时使用默认配置
    pub fn new_with_file(config_path: impl Into<PathBuf>) -> Self {
        Self::with_repository(Arc::new(FileConfigRepository::new(config_path)))
    }

    pub fn with_repository(repository: Arc<dyn ConfigRepository>) -> Self {
        Self { repository }
    }

    /// 读取配置，不做校验（用于展示）
    pub async fn get_all(&self) -> Result<AppConfig, ConfigError> {
        self.repository.load().await
    }

    /// 读取并校验配置，分析流程只使用通过校验的配置
    pub async fn load_validated(&self) -> Result<AppConfig, ConfigError> {
        let config = self.repository.load().await?;
        config
            .validate()
            .map_err(|errors| ConfigError::ValidationError { errors })?;

        debug!(
            "Using {:?} classifier '{}' from {}",
            config.classifier.provider_type,
            config.classifier.model,
            self.repository.location()
        );
        Ok(config)
    }

    /// 合并部分更新，校验通过后才写入
    pub async fn update(&self, partial: PartialAppConfig) -> Result<AppConfig, ConfigError> {
        let mut config = self.repository.load().await?;
        config.merge(partial);
        config
            .validate()
            .map_err(|errors| ConfigError::ValidationError { errors })?;

        self.repository.save(&config).await?;
        info!("Configuration updated in {}", self.repository.location());
        Ok(config)
    }

    /// 删除已保存的配置，返回默认配置
    pub async fn reset(&self) -> Result<AppConfig, ConfigError> {
        self.repository.clear().await?;
        info!("Configuration reset in {}", self.repository.location());
        self.repository.load().await
    }

    /// 配置是否已持久化
    pub async fn exists(&self) -> Result<bool, ConfigError> {
        self.repository.exists().await
    }
}
