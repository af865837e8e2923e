use async_trait::async_trait;
use thiserror::Error;

use super::super::domain::{CleanedTranscript, Transcript};

/// 仓储错误类型
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::SerializationError(err.to_string())
    }
}

/// 聊天记录仓储端口
#[async_trait]
pub trait TranscriptRepository: Send + Sync {
    /// 读取原始（或已清洗的）聊天记录
    async fn load(&self) -> Result<Transcript, RepositoryError>;

    /// 保存清洗结果
    async fn save_cleaned(&self, cleaned: &CleanedTranscript) -> Result<(), RepositoryError>;
}
