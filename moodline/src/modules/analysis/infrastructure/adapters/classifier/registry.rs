use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::modules::analysis::ports::{
    ClassificationError, ClassifierConfig, ClassifierPort, ProviderType,
};

use super::{HuggingFaceClassifier, KeywordClassifier};

/// 分类器适配器注册表
///
/// 按配置创建适配器，并以配置 ID 缓存实例
pub struct ClassifierRegistry {
    instances: RwLock<HashMap<String, Arc<dyn ClassifierPort>>>,
}

impl ClassifierRegistry {
    pub fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// 获取已创建的适配器
    pub async fn get(&self, id: &str) -> Option<Arc<dyn ClassifierPort>> {
        let instances = self.instances.read().await;
        instances.get(id).cloned()
    }

    /// 获取或创建适配器实例
    pub async fn get_or_create(
        &self,
        config: &ClassifierConfig,
    ) -> Result<Arc<dyn ClassifierPort>, ClassificationError> {
        {
            let instances = self.instances.read().await;
            if let Some(instance) = instances.get(&config.id) {
                return Ok(instance.clone());
            }
        }

        let adapter: Arc<dyn ClassifierPort> = Arc::from(Self::create_adapter(config)?);
        {
            let mut instances = self.instances.write().await;
            instances.insert(config.id.clone(), adapter.clone());
        }

        Ok(adapter)
    }

    /// 移除缓存的适配器
    pub async fn remove(&self, id: &str) -> bool {
        let mut instances = self.instances.write().await;
        instances.remove(id).is_some()
    }

    /// 根据配置创建适配器
    pub fn create_adapter(
        config: &ClassifierConfig,
    ) -> Result<Box<dyn ClassifierPort>, ClassificationError> {
        if config.provider_type.is_remote() {
            if config.base_url.trim().is_empty() {
                return Err(ClassificationError::InvalidConfig(
                    "base URL is required".to_string(),
                ));
            }
            if config.model.trim().is_empty() {
                return Err(ClassificationError::InvalidConfig(
                    "model is required".to_string(),
                ));
            }
        }

        info!(
            "Creating classifier '{}' ({:?})",
            config.id, config.provider_type
        );

        match config.provider_type {
            ProviderType::HuggingFace => Ok(Box::new(HuggingFaceClassifier::new(config.clone())?)),
            ProviderType::Keyword => Ok(Box::new(KeywordClassifier::new(config))),
        }
    }
}

impl Default for ClassifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}
