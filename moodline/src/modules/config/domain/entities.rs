// Config Domain Entities
//
// 配置领域实体定义

use serde::{Deserialize, Serialize};

use crate::modules::analysis::ports::{ClassifierConfig, ProviderType};

/// 并发分类请求数上限
pub const MAX_CONCURRENCY: usize = 64;

/// 分析流程配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisConfig {
    /// 同时进行中的分类请求数
    pub concurrency: usize,
    /// 每处理多少条消息输出一次进度日志
    pub progress_interval: usize,
    /// 报告是否缩进输出
    pub pretty_output: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            progress_interval: 100,
            pretty_output: true,
        }
    }
}

/// 应用配置聚合根
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub classifier: ClassifierConfig,
    pub analysis: AnalysisConfig,
}

impl AppConfig {
    /// 创建新的默认配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 合并部分配置更新
    pub fn merge(&mut self, partial: PartialAppConfig) {
        if let Some(classifier) = partial.classifier {
            if let Some(id) = classifier.id {
                self.classifier.id = id;
            }
            if let Some(provider_type) = classifier.provider_type {
                self.classifier.provider_type = provider_type;
            }
            if let Some(base_url) = classifier.base_url {
                self.classifier.base_url = base_url;
            }
            if let Some(api_key) = classifier.api_key {
                self.classifier.api_key = api_key;
            }
            if let Some(model) = classifier.model {
                self.classifier.model = model;
            }
            if let Some(timeout_secs) = classifier.timeout_secs {
                self.classifier.timeout_secs = timeout_secs;
            }
        }

        if let Some(analysis) = partial.analysis {
            if let Some(concurrency) = analysis.concurrency {
                self.analysis.concurrency = concurrency;
            }
            if let Some(progress_interval) = analysis.progress_interval {
                self.analysis.progress_interval = progress_interval;
            }
            if let Some(pretty_output) = analysis.pretty_output {
                self.analysis.pretty_output = pretty_output;
            }
        }
    }

    /// 验证配置是否有效
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.classifier.id.trim().is_empty() {
            errors.push("Classifier id must not be empty".to_string());
        }
        if self.classifier.timeout_secs == 0 {
            errors.push("Timeout must be greater than 0 seconds".to_string());
        }
        if self.classifier.provider_type.is_remote() {
            if self.classifier.base_url.trim().is_empty() {
                errors.push("Base URL is required for remote classifiers".to_string());
            }
            if self.classifier.model.trim().is_empty() {
                errors.push("Model is required for remote classifiers".to_string());
            }
        }

        if self.analysis.concurrency == 0 || self.analysis.concurrency > MAX_CONCURRENCY {
            errors.push(format!(
                "Concurrency must be between 1 and {}",
                MAX_CONCURRENCY
            ));
        }
        if self.analysis.progress_interval == 0 {
            errors.push("Progress interval must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// 部分配置更新（用于合并）
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PartialAppConfig {
    pub classifier: Option<PartialClassifierConfig>,
    pub analysis: Option<PartialAnalysisConfig>,
}

impl PartialAppConfig {
    pub fn is_empty(&self) -> bool {
        self.classifier.is_none() && self.analysis.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PartialClassifierConfig {
    pub id: Option<String>,
    pub provider_type: Option<ProviderType>,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PartialAnalysisConfig {
    pub concurrency: Option<usize>,
    pub progress_interval: Option<usize>,
    pub pretty_output: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.classifier.provider_type, ProviderType::HuggingFace);
        assert_eq!(config.analysis.concurrency, 1);
        assert_eq!(config.analysis.progress_interval, 100);
        assert!(config.analysis.pretty_output);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_app_config_merge() {
        let mut config = AppConfig::default();
        let partial = PartialAppConfig {
            classifier: Some(PartialClassifierConfig {
                provider_type: Some(ProviderType::Keyword),
                ..Default::default()
            }),
            analysis: Some(PartialAnalysisConfig {
                concurrency: Some(8),
                ..Default::default()
            }),
        };

        config.merge(partial);
        assert_eq!(config.classifier.provider_type, ProviderType::Keyword);
        assert_eq!(config.analysis.concurrency, 8);
        // 其他字段保持不变
        assert_eq!(
            config.classifier.model,
            "cointegrated/rubert-tiny2-cedr-emotion-detection"
        );
        assert_eq!(config.analysis.progress_interval, 100);
    }

    #[test]
    fn test_app_config_validate() {
        let mut config = AppConfig::default();
        config.analysis.concurrency = 0;
        config.analysis.progress_interval = 0;
        config.classifier.timeout_secs = 0;
        config.classifier.model = String::new();

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4);

        let mut too_many = AppConfig::default();
        too_many.analysis.concurrency = MAX_CONCURRENCY + 1;
        assert!(too_many.validate().is_err());
    }

    #[test]
    fn test_keyword_provider_needs_no_model() {
        let mut config = AppConfig::default();
        config.classifier.provider_type = ProviderType::Keyword;
        config.classifier.model = String::new();
        config.classifier.base_url = String::new();

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"classifier": {"providerType": "keyword"}}"#).unwrap();

        assert_eq!(config.classifier.provider_type, ProviderType::Keyword);
        assert_eq!(config.classifier.timeout_secs, 60);
        assert_eq!(config.analysis, AnalysisConfig::default());
    }
}
