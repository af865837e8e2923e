use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 分类错误类型
#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error: {code} - {message}")]
    ApiError { code: String, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Classifier returned no scores")]
    EmptyResult,

    #[error("Provider not available: {0}")]
    ProviderNotAvailable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// 分类器提供商类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// Hugging Face 风格的推理接口
    HuggingFace,
    /// 离线关键词分类器
    Keyword,
}

impl ProviderType {
    /// 是否需要远程服务
    pub fn is_remote(&self) -> bool {
        matches!(self, ProviderType::HuggingFace)
    }
}

impl std::str::FromStr for ProviderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "huggingface" | "hf" => Ok(ProviderType::HuggingFace),
            "keyword" => Ok(ProviderType::Keyword),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// 单个原始标签及其置信度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// 分类器信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierInfo {
    pub id: String,
    pub provider_type: ProviderType,
    /// 写入报告的模型标识
    pub model: String,
}

/// 分类器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassifierConfig {
    pub id: String,
    pub provider_type: ProviderType,
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            id: "default".to_string(),
            provider_type: ProviderType::HuggingFace,
            base_url: "https://api-inference.huggingface.co".to_string(),
            api_key: String::new(),
            model: "cointegrated/rubert-tiny2-cedr-emotion-detection".to_string(),
            timeout_secs: 60,
        }
    }
}

/// 文本情感分类端口
///
/// 外部分类能力的抽象：对一段文本返回覆盖完整标签空间的 (label, score) 列表。
/// 实现必须可重复、无状态地调用。
#[async_trait]
pub trait ClassifierPort: Send + Sync {
    /// 获取提供商 ID
    fn provider_id(&self) -> &str;

    /// 获取分类器信息
    fn info(&self) -> ClassifierInfo;

    /// 对文本进行分类
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>, ClassificationError>;
}
