use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::infrastructure::{EventBus, PipelineEvent};
use crate::modules::analysis::{
    AnalysisModule, AnalysisReport, AnalyzeTranscriptCommand, AnalyzeTranscriptResponse,
    ClassifierRegistry, FileReportRepository, LabelDistribution,
};
use crate::modules::config::{AppConfig, ConfigError};
use crate::modules::transcript::FileTranscriptRepository;
use crate::shared::paths::report_path_for;
use crate::shared::AppResult;

/// 分析聊天记录并写出情感报告
pub async fn analyze(
    input: &Path,
    output: Option<PathBuf>,
    config: &AppConfig,
    show_progress: bool,
) -> AppResult<AnalyzeTranscriptResponse> {
    // 配置文件可能被手工修改过
    config
        .validate()
        .map_err(|errors| ConfigError::ValidationError { errors })?;

    let output = output.unwrap_or_else(|| report_path_for(input));

    let report_repository =
        FileReportRepository::new(&output).with_pretty(config.analysis.pretty_output);
    let registry = ClassifierRegistry::new();
    let event_bus = Arc::new(EventBus::new());

    let progress = show_progress.then(|| spawn_progress_bar(&event_bus));

    let module = AnalysisModule::new(Arc::new(report_repository))
        .with_event_bus(event_bus.clone())
        .with_progress_interval(config.analysis.progress_interval)
        .with_classifier_config(&config.classifier, &registry, config.analysis.concurrency)
        .await?;

    tracing::info!(
        "Analyzing {} with {}",
        input.display(),
        module
            .classifier_info()
            .map(|info| info.model)
            .unwrap_or_default()
    );

    let result = module
        .analyze(
            Arc::new(FileTranscriptRepository::new(input)),
            AnalyzeTranscriptCommand::default(),
        )
        .await;

    // 关闭事件通道，让进度条任务退出
    drop(module);
    drop(event_bus);
    if let Some(progress) = progress {
        if let Err(e) = progress.await {
            tracing::warn!("Progress reporter stopped unexpectedly: {}", e);
        }
    }

    let response = result?;

    println!(
        "Skipped {} messages ({} non-message, {} empty)",
        response.skipped_non_message + response.skipped_empty,
        response.skipped_non_message,
        response.skipped_empty
    );
    println!("{}", render_emotion_statistics(&response.report));
    if response.failures > 0 {
        println!(
            "{} messages fell back to neutral after classifier errors",
            response.failures
        );
    }
    println!("Saved to {}", output.display());

    Ok(response)
}

/// 渲染各情感的数量与占比
pub fn render_emotion_statistics(report: &AnalysisReport) -> String {
    let distribution =
        LabelDistribution::from_labels(report.messages.iter().map(|message| message.emotion()));

    let mut lines = vec![format!(
        "Emotion statistics ({} messages):",
        report.total_messages()
    )];
    for share in &distribution.shares {
        lines.push(format!(
            "  {}: {} ({:.1}%)",
            share.emotion, share.count, share.percentage
        ));
    }
    lines.join("\n")
}

fn spawn_progress_bar(event_bus: &EventBus) -> JoinHandle<()> {
    let mut receiver = event_bus.subscribe();
    let bar = ProgressBar::new(0);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{bar:40.cyan/blue} {pos}/{len} {msg}")
    {
        bar.set_style(style);
    }

    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(PipelineEvent::TranscriptNormalized { kept, .. }) => {
                    bar.set_length(kept as u64);
                }
                Ok(PipelineEvent::MessageClassified { processed, .. }) => {
                    bar.set_position(processed as u64);
                }
                Ok(PipelineEvent::ClassificationFallback { processed, .. }) => {
                    bar.set_position(processed as u64);
                    bar.set_message("(fallback)");
                }
                Ok(PipelineEvent::AnalysisComplete { .. }) => {
                    bar.finish_and_clear();
                    break;
                }
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => {
                    bar.abandon();
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::analysis::{
        ClassifiedMessage, EmotionLabel, EmotionVocabulary, ProviderType,
    };
    use crate::shared::AppError;
    use tempfile::TempDir;

    #[test]
    fn test_render_emotion_statistics() {
        let report = AnalysisReport::new(
            "m",
            EmotionVocabulary::default(),
            vec![
                ClassifiedMessage::new("A", EmotionLabel::Joy, "a"),
                ClassifiedMessage::new("A", EmotionLabel::Joy, "b"),
                ClassifiedMessage::new("B", EmotionLabel::Fear, "c"),
                ClassifiedMessage::new("B", EmotionLabel::Neutral, "d"),
            ],
        );

        let rendered = render_emotion_statistics(&report);
        assert!(rendered.starts_with("Emotion statistics (4 messages):"));
        assert!(rendered.contains("радость: 2 (50.0%)"));
        assert!(rendered.contains("страх: 1 (25.0%)"));
    }

    #[tokio::test]
    async fn test_analyze_with_keyword_classifier() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("chat_cleaned.json");
        tokio::fs::write(
            &input,
            r#"{"messages": [{"author": "A", "text": "Ура!"}, {"author": "B", "text": "ладно"}]}"#,
        )
        .await
        .unwrap();

        let mut config = AppConfig::default();
        config.classifier.provider_type = ProviderType::Keyword;

        let response = analyze(&input, None, &config, false).await.unwrap();

        assert_eq!(response.report.total_messages(), 2);
        assert!(temp_dir.path().join("chat_emotions.json").exists());
    }

    #[tokio::test]
    async fn test_analyze_rejects_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("chat.json");
        tokio::fs::write(&input, r#"{"messages": [{"author": "A", "text": "Ура!"}]}"#)
            .await
            .unwrap();

        let mut config = AppConfig::default();
        config.classifier.provider_type = ProviderType::Keyword;
        config.classifier.timeout_secs = 0;

        let result = analyze(&input, None, &config, false).await;

        assert!(matches!(
            result,
            Err(AppError::ConfigError(ConfigError::ValidationError { .. }))
        ));
        assert!(!temp_dir.path().join("chat_emotions.json").exists());
    }
}
