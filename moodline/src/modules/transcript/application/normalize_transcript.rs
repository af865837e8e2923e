use async_trait::async_trait;
use std::sync::Arc;

use super::CommandHandler;
use crate::modules::transcript::domain::{CleanedTranscript, MessageNormalizer};
use crate::modules::transcript::ports::{RepositoryError, TranscriptRepository};

/// 清洗聊天记录命令
#[derive(Debug, Clone, Default)]
pub struct NormalizeTranscriptCommand {
    /// 是否写出清洗结果
    pub persist: bool,
}

impl NormalizeTranscriptCommand {
    pub fn new(persist: bool) -> Self {
        Self { persist }
    }
}

/// 清洗聊天记录响应
#[derive(Debug, Clone)]
pub struct NormalizeTranscriptResponse {
    pub cleaned: CleanedTranscript,
    pub skipped_non_message: usize,
    pub skipped_empty: usize,
}

impl NormalizeTranscriptResponse {
    pub fn skipped(&self) -> usize {
        self.skipped_non_message + self.skipped_empty
    }
}

/// 清洗聊天记录命令处理器
pub struct NormalizeTranscriptHandler {
    repository: Arc<dyn TranscriptRepository>,
    normalizer: MessageNormalizer,
}

impl NormalizeTranscriptHandler {
    pub fn new(repository: Arc<dyn TranscriptRepository>) -> Self {
        Self {
            repository,
            normalizer: MessageNormalizer::new(),
        }
    }
}

#[async_trait]
impl CommandHandler<NormalizeTranscriptCommand> for NormalizeTranscriptHandler {
    type Output = NormalizeTranscriptResponse;
    type Error = RepositoryError;

    async fn handle(
        &self,
        command: NormalizeTranscriptCommand,
    ) -> Result<Self::Output, Self::Error> {
        let transcript = self.repository.load().await?;
        let outcome = self.normalizer.normalize(&transcript.messages);

        let cleaned = CleanedTranscript {
            messages: outcome.messages,
        };

        if command.persist {
            self.repository.save_cleaned(&cleaned).await?;
        }

        Ok(NormalizeTranscriptResponse {
            cleaned,
            skipped_non_message: outcome.skipped_non_message,
            skipped_empty: outcome.skipped_empty,
        })
    }
}
