use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::analysis::application::{ApplicationError, QueryHandler};
use crate::modules::analysis::domain::{AggregateReport, MoodAggregator};
use crate::modules::analysis::ports::ReportRepository;

/// 聚合分析报告查询
#[derive(Debug, Clone, Default)]
pub struct AggregateReportQuery;

/// 聚合分析报告响应
#[derive(Debug, Clone)]
pub struct AggregateReportResponse {
    pub model: String,
    pub aggregate: AggregateReport,
}

/// 聚合分析报告查询处理器
pub struct AggregateReportHandler {
    repository: Arc<dyn ReportRepository>,
    aggregator: MoodAggregator,
}

impl AggregateReportHandler {
    pub fn new(repository: Arc<dyn ReportRepository>) -> Self {
        Self {
            repository,
            aggregator: MoodAggregator::new(),
        }
    }
}

#[async_trait]
impl QueryHandler<AggregateReportQuery, AggregateReportResponse> for AggregateReportHandler {
    async fn handle(
        &self,
        _query: AggregateReportQuery,
    ) -> Result<AggregateReportResponse, ApplicationError> {
        let report = self
            .repository
            .load()
            .await?
            .ok_or_else(|| ApplicationError::ReportNotFound("analysis report".to_string()))?;

        Ok(AggregateReportResponse {
            model: report.model().to_string(),
            aggregate: self.aggregator.aggregate(&report.messages),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::analysis::domain::{
        AnalysisReport, ClassifiedMessage, EmotionLabel, EmotionVocabulary,
    };
    use crate::modules::analysis::infrastructure::InMemoryReportRepository;

    #[tokio::test]
    async fn test_aggregate_saved_report() {
        let report = AnalysisReport::new(
            "model-x",
            EmotionVocabulary::default(),
            vec![
                ClassifiedMessage::new("A", EmotionLabel::Joy, "a"),
                ClassifiedMessage::new("B", EmotionLabel::Fear, "b"),
                ClassifiedMessage::new("A", EmotionLabel::Neutral, "c"),
            ],
        );
        let handler =
            AggregateReportHandler::new(Arc::new(InMemoryReportRepository::with_report(report)));

        let response = handler.handle(AggregateReportQuery).await.unwrap();

        assert_eq!(response.model, "model-x");
        assert_eq!(response.aggregate.total_messages, 3);
        assert_eq!(response.aggregate.author("A").unwrap().message_count, 2);
        assert_eq!(response.aggregate.author("A").unwrap().mean_mood, 7.0);
        assert_eq!(response.aggregate.author("B").unwrap().mean_mood, 1.0);
    }

    #[tokio::test]
    async fn test_missing_report() {
        let handler = AggregateReportHandler::new(Arc::new(InMemoryReportRepository::new()));

        let result = handler.handle(AggregateReportQuery).await;
        assert!(matches!(result, Err(ApplicationError::ReportNotFound(_))));
    }
}
