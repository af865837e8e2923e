// Analysis Module - 情感分析模块
//
// 六边形架构：
// - domain: 情感值对象、已分类消息、分类与聚合领域服务
// - ports: 分类器端口与报告仓储端口
// - infrastructure: HuggingFace/关键词分类器适配器、报告仓储
// - application: 分析命令与聚合查询处理器

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{
    AggregateReportHandler, AggregateReportQuery, AggregateReportResponse,
    AnalyzeTranscriptCommand, AnalyzeTranscriptHandler, AnalyzeTranscriptResponse,
    ApplicationError, CommandHandler, QueryHandler,
};

pub use domain::{
    AggregateReport, AnalysisInfo, AnalysisReport, AuthorMood, ClassifiedMessage,
    EmotionClassifier, EmotionLabel, EmotionVocabulary, LabelDistribution, LabelShare,
    MoodAggregator, MoodScore, SmoothedPoint,
};

pub use infrastructure::{
    ClassifierRegistry, FileReportRepository, HuggingFaceClassifier, InMemoryReportRepository,
    KeywordClassifier,
};

pub use ports::{
    ClassificationError, ClassifierConfig, ClassifierInfo, ClassifierPort, LabelScore,
    ProviderType, ReportRepository,
};

use std::sync::Arc;

use crate::infrastructure::EventBus;
use crate::modules::transcript::TranscriptRepository;

/// Analysis 模块容器
///
/// 管理报告仓储、分类服务与处理器的依赖注入
pub struct AnalysisModule {
    report_repository: Arc<dyn ReportRepository>,
    classifier: Option<Arc<EmotionClassifier>>,
    event_bus: Option<Arc<EventBus>>,
    progress_interval: usize,
    aggregate_report_handler: AggregateReportHandler,
}

impl AnalysisModule {
    /// 创建只读模块（不带分类器，只能聚合已有报告）
    pub fn new(report_repository: Arc<dyn ReportRepository>) -> Self {
        let aggregate_report_handler = AggregateReportHandler::new(report_repository.clone());

        Self {
            report_repository,
            classifier: None,
            event_bus: None,
            progress_interval: 100,
            aggregate_report_handler,
        }
    }

    /// 按配置创建分类器并挂载到模块
    pub async fn with_classifier_config(
        self,
        config: &ClassifierConfig,
        registry: &ClassifierRegistry,
        concurrency: usize,
    ) -> Result<Self, ApplicationError> {
        let port = registry.get_or_create(config).await?;
        let classifier = EmotionClassifier::new(port).with_concurrency(concurrency);
        Ok(self.with_classifier(Arc::new(classifier)))
    }

    pub fn with_classifier(mut self, classifier: Arc<EmotionClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn with_event_bus(mut self, event_bus: Arc<EventBus>) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    /// 当前分类器信息
    pub fn classifier_info(&self) -> Option<ClassifierInfo> {
        self.classifier
            .as_ref()
            .map(|classifier| classifier.classifier().info())
    }

    // Command handlers

    /// 分析聊天记录（创建临时处理器）
    pub async fn analyze(
        &self,
        transcript_repository: Arc<dyn TranscriptRepository>,
        command: AnalyzeTranscriptCommand,
    ) -> Result<AnalyzeTranscriptResponse, ApplicationError> {
        let classifier = self.classifier.clone().ok_or_else(|| {
            ApplicationError::ClassificationError(ClassificationError::ProviderNotAvailable(
                "no classifier configured".to_string(),
            ))
        })?;

        let handler = AnalyzeTranscriptHandler::new(
            transcript_repository,
            self.report_repository.clone(),
            classifier,
        )
        .with_event_bus(self.event_bus.clone())
        .with_progress_interval(self.progress_interval);

        handler.handle(command).await
    }

    // Query handlers

    /// 聚合已保存的报告
    pub async fn aggregate(
        &self,
        query: AggregateReportQuery,
    ) -> Result<AggregateReportResponse, ApplicationError> {
        self.aggregate_report_handler.handle(query).await
    }
}
