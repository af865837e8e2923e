// Hugging Face Adapter - 文本分类推理接口
//
// POST {base_url}/models/{model}，请求体 {"inputs": text}

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use crate::modules::analysis::ports::{
    ClassificationError, ClassifierConfig, ClassifierInfo, ClassifierPort, LabelScore,
    ProviderType,
};

/// 推理请求
#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    options: InferenceOptions,
}

#[derive(Debug, Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

/// 推理响应：单条输入时服务端可能返回嵌套或扁平的列表
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

/// 错误响应
#[derive(Debug, Deserialize)]
struct InferenceErrorBody {
    error: String,
}

/// Hugging Face 推理适配器
pub struct HuggingFaceClassifier {
    config: ClassifierConfig,
    client: Client,
}

impl HuggingFaceClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self, ClassificationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClassificationError::NetworkError(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// 获取 API URL
    fn api_url(&self) -> String {
        format!(
            "{}/models/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// 解析推理响应
    fn parse_response(body: &str) -> Result<Vec<LabelScore>, ClassificationError> {
        let response: InferenceResponse = serde_json::from_str(body)
            .map_err(|e| ClassificationError::InvalidResponse(e.to_string()))?;

        Ok(match response {
            InferenceResponse::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
            InferenceResponse::Flat(scores) => scores,
        })
    }

    /// 从错误响应中提取错误信息
    fn error_message(body: String) -> String {
        serde_json::from_str::<InferenceErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body)
    }
}

#[async_trait]
impl ClassifierPort for HuggingFaceClassifier {
    fn provider_id(&self) -> &str {
        &self.config.id
    }

    fn info(&self) -> ClassifierInfo {
        ClassifierInfo {
            id: self.config.id.clone(),
            provider_type: ProviderType::HuggingFace,
            model: self.config.model.clone(),
        }
    }

    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>, ClassificationError> {
        debug!("Sending classification request: model={}", self.config.model);

        let mut request = self.client.post(self.api_url()).json(&InferenceRequest {
            inputs: text,
            options: InferenceOptions {
                wait_for_model: true,
            },
        });
        if !self.config.api_key.is_empty() {
            request = request.bearer_auth(&self.config.api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClassificationError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClassificationError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            let message = Self::error_message(body);
            error!("Inference API error: {} - {}", status, message);
            return Err(ClassificationError::ApiError {
                code: status.as_str().to_string(),
                message,
            });
        }

        Self::parse_response(&body)
    }
}
