use async_trait::async_trait;

use super::super::domain::AnalysisReport;
pub use crate::modules::transcript::ports::RepositoryError;

/// 分析报告仓储端口
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// 保存报告
    async fn save(&self, report: &AnalysisReport) -> Result<(), RepositoryError>;

    /// 读取报告，不存在时返回 None
    async fn load(&self) -> Result<Option<AnalysisReport>, RepositoryError>;
}
