use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::modules::analysis::domain::AnalysisReport;
use crate::modules::analysis::ports::{ReportRepository, RepositoryError};

/// 内存报告仓储（用于测试）
pub struct InMemoryReportRepository {
    report: RwLock<Option<AnalysisReport>>,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self {
            report: RwLock::new(None),
        }
    }

    pub fn with_report(report: AnalysisReport) -> Self {
        Self {
            report: RwLock::new(Some(report)),
        }
    }
}

impl Default for InMemoryReportRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn save(&self, report: &AnalysisReport) -> Result<(), RepositoryError> {
        let mut slot = self.report.write().await;
        *slot = Some(report.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<AnalysisReport>, RepositoryError> {
        Ok(self.report.read().await.clone())
    }
}
