use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::value_objects::EmotionVocabulary;
use super::ClassifiedMessage;

/// 分析元信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInfo {
    /// 分类模型标识
    pub model: String,
    pub total_messages: usize,
    /// 原始标签到情感的映射
    pub emotion_mapping: EmotionVocabulary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

/// 情感分析报告
///
/// 渲染端唯一依赖的输出，自描述，不依赖进程状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis_info: AnalysisInfo,
    pub messages: Vec<ClassifiedMessage>,
}

impl AnalysisReport {
    pub fn new(
        model: impl Into<String>,
        emotion_mapping: EmotionVocabulary,
        messages: Vec<ClassifiedMessage>,
    ) -> Self {
        Self {
            analysis_info: AnalysisInfo {
                model: model.into(),
                total_messages: messages.len(),
                emotion_mapping,
                generated_at: Some(Utc::now()),
            },
            messages,
        }
    }

    pub fn model(&self) -> &str {
        &self.analysis_info.model
    }

    pub fn total_messages(&self) -> usize {
        self.analysis_info.total_messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::analysis::domain::value_objects::EmotionLabel;

    #[test]
    fn test_report_counts_messages() {
        let report = AnalysisReport::new(
            "model",
            EmotionVocabulary::default(),
            vec![
                ClassifiedMessage::new("A", EmotionLabel::Joy, "x"),
                ClassifiedMessage::new("B", EmotionLabel::Fear, "y"),
            ],
        );

        assert_eq!(report.total_messages(), 2);
        assert!(report.analysis_info.generated_at.is_some());
    }

    #[test]
    fn test_reads_report_without_timestamp() {
        let json = r#"{
            "analysis_info": {
                "model": "cointegrated/rubert-tiny2-cedr-emotion-detection",
                "total_messages": 1,
                "emotion_mapping": {"joy": "радость"}
            },
            "messages": [{"author": "A", "emotion": "радость", "text": "ура"}]
        }"#;

        let report: AnalysisReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.messages[0].emotion(), EmotionLabel::Joy);
        assert!(report.analysis_info.generated_at.is_none());
    }
}
