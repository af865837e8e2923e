// 文件报告仓储
//
// 把分析报告保存为 JSON 文件，供渲染端读取

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use crate::modules::analysis::domain::AnalysisReport;
use crate::modules::analysis::ports::{ReportRepository, RepositoryError};

/// 文件报告仓储
pub struct FileReportRepository {
    file_path: PathBuf,
    pretty: bool,
}

impl FileReportRepository {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            pretty: true,
        }
    }

    /// 是否输出带缩进的 JSON
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

#[async_trait]
impl ReportRepository for FileReportRepository {
    async fn save(&self, report: &AnalysisReport) -> Result<(), RepositoryError> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| RepositoryError::StorageError(e.to_string()))?;
            }
        }

        let content = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };

        fs::write(&self.file_path, content)
            .await
            .map_err(|e| RepositoryError::StorageError(e.to_string()))?;

        info!("Report saved to {}", self.file_path.display());
        Ok(())
    }

    async fn load(&self) -> Result<Option<AnalysisReport>, RepositoryError> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.file_path)
            .await
            .map_err(|e| RepositoryError::StorageError(e.to_string()))?;

        Ok(Some(serde_json::from_str(&content)?))
    }
}
