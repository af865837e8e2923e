// 文件聊天记录仓储
//
// 从 JSON 导出文件读取聊天记录，清洗结果写入相邻文件

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::modules::transcript::domain::{CleanedTranscript, Transcript};
use crate::modules::transcript::ports::{RepositoryError, TranscriptRepository};
use crate::shared::paths::cleaned_path_for;

/// 文件聊天记录仓储
pub struct FileTranscriptRepository {
    source_path: PathBuf,
    cleaned_path: PathBuf,
}

impl FileTranscriptRepository {
    /// 清洗结果默认写入 `<stem>_cleaned.json`
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        let source_path = source_path.into();
        let cleaned_path = cleaned_path_for(&source_path);
        Self {
            source_path,
            cleaned_path,
        }
    }

    pub fn with_cleaned_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cleaned_path = path.into();
        self
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn cleaned_path(&self) -> &Path {
        &self.cleaned_path
    }
}

#[async_trait]
impl TranscriptRepository for FileTranscriptRepository {
    async fn load(&self) -> Result<Transcript, RepositoryError> {
        if !self.source_path.exists() {
            return Err(RepositoryError::NotFound(
                self.source_path.display().to_string(),
            ));
        }

        let content = fs::read_to_string(&self.source_path)
            .await
            .map_err(|e| RepositoryError::StorageError(e.to_string()))?;

        let transcript: Transcript = serde_json::from_str(&content)?;
        debug!(
            "Loaded {} records from {}",
            transcript.messages.len(),
            self.source_path.display()
        );

        Ok(transcript)
    }

    async fn save_cleaned(&self, cleaned: &CleanedTranscript) -> Result<(), RepositoryError> {
        if let Some(parent) = self.cleaned_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| RepositoryError::StorageError(e.to_string()))?;
            }
        }

        let content = serde_json::to_string_pretty(cleaned)?;
        fs::write(&self.cleaned_path, content)
            .await
            .map_err(|e| RepositoryError::StorageError(e.to_string()))?;

        Ok(())
    }
}
