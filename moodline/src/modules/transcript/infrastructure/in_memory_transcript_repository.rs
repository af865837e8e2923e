use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::modules::transcript::domain::{CleanedTranscript, Transcript};
use crate::modules::transcript::ports::{RepositoryError, TranscriptRepository};

/// 内存聊天记录仓储（用于测试）
pub struct InMemoryTranscriptRepository {
    transcript: Transcript,
    cleaned: RwLock<Option<CleanedTranscript>>,
}

impl InMemoryTranscriptRepository {
    pub fn new(transcript: Transcript) -> Self {
        Self {
            transcript,
            cleaned: RwLock::new(None),
        }
    }

    /// 最近一次保存的清洗结果
    pub async fn cleaned(&self) -> Option<CleanedTranscript> {
        self.cleaned.read().await.clone()
    }
}

#[async_trait]
impl TranscriptRepository for InMemoryTranscriptRepository {
    async fn load(&self) -> Result<Transcript, RepositoryError> {
        Ok(self.transcript.clone())
    }

    async fn save_cleaned(&self, cleaned: &CleanedTranscript) -> Result<(), RepositoryError> {
        let mut slot = self.cleaned.write().await;
        *slot = Some(cleaned.clone());
        Ok(())
    }
}
