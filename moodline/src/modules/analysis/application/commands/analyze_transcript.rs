use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::infrastructure::{EventBus, PipelineEvent};
use crate::modules::analysis::application::{ApplicationError, CommandHandler};
use crate::modules::analysis::domain::{AnalysisReport, ClassificationProgress, EmotionClassifier};
use crate::modules::analysis::ports::ReportRepository;
use crate::modules::transcript::{MessageNormalizer, TranscriptRepository};

/// 分析聊天记录命令
#[derive(Debug, Clone)]
pub struct AnalyzeTranscriptCommand {
    /// 是否写出报告
    pub persist: bool,
}

impl Default for AnalyzeTranscriptCommand {
    fn default() -> Self {
        Self { persist: true }
    }
}

/// 分析聊天记录响应
#[derive(Debug, Clone)]
pub struct AnalyzeTranscriptResponse {
    pub report: AnalysisReport,
    pub skipped_non_message: usize,
    pub skipped_empty: usize,
    /// 分类器失败、回退为中性的数量
    pub failures: usize,
}

/// 分析聊天记录命令处理器
///
/// 读取 → 清洗 → 逐条分类 → 组装报告 → 保存
pub struct AnalyzeTranscriptHandler {
    transcript_repository: Arc<dyn TranscriptRepository>,
    report_repository: Arc<dyn ReportRepository>,
    classifier: Arc<EmotionClassifier>,
    event_bus: Option<Arc<EventBus>>,
    progress_interval: usize,
}

impl AnalyzeTranscriptHandler {
    pub fn new(
        transcript_repository: Arc<dyn TranscriptRepository>,
        report_repository: Arc<dyn ReportRepository>,
        classifier: Arc<EmotionClassifier>,
    ) -> Self {
        Self {
            transcript_repository,
            report_repository,
            classifier,
            event_bus: None,
            progress_interval: 100,
        }
    }

    pub fn with_event_bus(mut self, event_bus: Option<Arc<EventBus>>) -> Self {
        self.event_bus = event_bus;
        self
    }

    /// 每处理多少条消息输出一次进度日志
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    fn publish(&self, event: PipelineEvent) {
        if let Some(bus) = &self.event_bus {
            bus.publish(event);
        }
    }
}

#[async_trait]
impl CommandHandler<AnalyzeTranscriptCommand, AnalyzeTranscriptResponse>
    for AnalyzeTranscriptHandler
{
    async fn handle(
        &self,
        command: AnalyzeTranscriptCommand,
    ) -> Result<AnalyzeTranscriptResponse, ApplicationError> {
        let transcript = self.transcript_repository.load().await?;
        let normalized = MessageNormalizer::new().normalize(&transcript.messages);

        self.publish(PipelineEvent::TranscriptNormalized {
            kept: normalized.messages.len(),
            skipped: normalized.skipped(),
        });

        let interval = self.progress_interval;
        let outcome = self
            .classifier
            .classify_all_with(&normalized.messages, |progress| {
                let (processed, total) = match &progress {
                    ClassificationProgress::Classified {
                        processed, total, ..
                    } => (*processed, *total),
                    ClassificationProgress::Fallback {
                        processed, total, ..
                    } => (*processed, *total),
                };

                if processed % interval == 0 {
                    info!("Processed {}/{} messages", processed, total);
                }

                let event = match progress {
                    ClassificationProgress::Classified {
                        processed, total, ..
                    } => PipelineEvent::MessageClassified { processed, total },
                    ClassificationProgress::Fallback {
                        processed,
                        total,
                        reason,
                    } => PipelineEvent::ClassificationFallback {
                        processed,
                        total,
                        reason,
                    },
                };
                self.publish(event);
            })
            .await;

        let fallbacks = outcome.fallbacks();
        let model = self.classifier.classifier().info().model;
        let report = AnalysisReport::new(
            model,
            self.classifier.vocabulary().clone(),
            outcome.messages,
        );

        if command.persist {
            self.report_repository.save(&report).await?;
        }

        self.publish(PipelineEvent::AnalysisComplete {
            total: report.total_messages(),
            fallbacks,
        });

        info!(
            "Analysis complete: {} messages, {} failed classifications",
            report.total_messages(),
            outcome.failures
        );

        Ok(AnalyzeTranscriptResponse {
            report,
            skipped_non_message: normalized.skipped_non_message,
            skipped_empty: normalized.skipped_empty,
            failures: outcome.failures,
        })
    }
}
