use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, warn};

use super::super::entities::ClassifiedMessage;
use super::super::value_objects::{EmotionLabel, EmotionVocabulary};
use crate::modules::analysis::ports::{ClassificationError, ClassifierPort, LabelScore};
use crate::modules::transcript::domain::NormalizedMessage;

/// 批量分类结果
#[derive(Debug, Clone, Default)]
pub struct ClassificationOutcome {
    pub messages: Vec<ClassifiedMessage>,
    /// 分类器调用失败、回退为中性的数量
    pub failures: usize,
    /// 空文本、未调用分类器的数量
    pub empty_inputs: usize,
}

impl ClassificationOutcome {
    pub fn fallbacks(&self) -> usize {
        self.failures + self.empty_inputs
    }
}

/// 单条消息的分类进度
#[derive(Debug, Clone)]
pub enum ClassificationProgress {
    Classified {
        processed: usize,
        total: usize,
        emotion: EmotionLabel,
    },
    Fallback {
        processed: usize,
        total: usize,
        reason: String,
    },
}

/// 情感分类服务
///
/// 领域服务：调用外部分类器，选出置信度最高的原始标签并映射到领域词表。
/// 任何单条消息的失败都只会让该消息回退为中性，不会中断整批处理。
pub struct EmotionClassifier {
    classifier: Arc<dyn ClassifierPort>,
    vocabulary: EmotionVocabulary,
    concurrency: usize,
}

impl EmotionClassifier {
    pub fn new(classifier: Arc<dyn ClassifierPort>) -> Self {
        Self {
            classifier,
            vocabulary: EmotionVocabulary::default(),
            concurrency: 1,
        }
    }

    pub fn with_vocabulary(mut self, vocabulary: EmotionVocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// 同时进行中的分类请求数，输出顺序始终与输入一致
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn vocabulary(&self) -> &EmotionVocabulary {
        &self.vocabulary
    }

    pub fn classifier(&self) -> &Arc<dyn ClassifierPort> {
        &self.classifier
    }

    /// 分类单段文本
    ///
    /// 空文本直接返回中性且不调用分类器；未知原始标签映射为中性
    pub async fn try_classify(&self, text: &str) -> Result<EmotionLabel, ClassificationError> {
        if text.trim().is_empty() {
            return Ok(EmotionLabel::Neutral);
        }

        let scores = self.classifier.classify(text).await?;
        let top = select_top(&scores).ok_or(ClassificationError::EmptyResult)?;

        let emotion = self.vocabulary.map(&top.label);
        debug!(
            "Top label '{}' ({:.3}) -> {}",
            top.label,
            top.score,
            emotion.code()
        );

        Ok(emotion)
    }

    /// 分类单段文本，失败时回退为中性
    pub async fn classify_message(&self, text: &str) -> EmotionLabel {
        match self.try_classify(text).await {
            Ok(emotion) => emotion,
            Err(e) => {
                warn!("Classification failed, falling back to neutral: {}", e);
                EmotionLabel::Neutral
            }
        }
    }

    async fn classify_entry<'a>(
        &'a self,
        message: &'a NormalizedMessage,
    ) -> (&'a NormalizedMessage, Result<EmotionLabel, ClassificationError>) {
        let result = self.try_classify(message.text()).await;
        (message, result)
    }

    /// 批量分类，保持输入顺序
    pub async fn classify_all(&self, messages: &[NormalizedMessage]) -> ClassificationOutcome {
        self.classify_all_with(messages, |_| {}).await
    }

    /// 批量分类，并对每条消息回调进度
    pub async fn classify_all_with<F>(
        &self,
        messages: &[NormalizedMessage],
        mut on_progress: F,
    ) -> ClassificationOutcome
    where
        F: FnMut(ClassificationProgress),
    {
        let total = messages.len();
        let mut outcome = ClassificationOutcome {
            messages: Vec::with_capacity(total),
            ..Default::default()
        };

        // 先构造全部 future，流的类型里不能带闭包，否则无法证明为 Send
        let pending: Vec<_> = messages
            .iter()
            .map(|message| self.classify_entry(message))
            .collect();
        let mut results = stream::iter(pending).buffered(self.concurrency);

        while let Some((message, result)) = results.next().await {
            let processed = outcome.messages.len() + 1;

            if message.text().trim().is_empty() {
                outcome.empty_inputs += 1;
            }

            let emotion = match result {
                Ok(emotion) => {
                    on_progress(ClassificationProgress::Classified {
                        processed,
                        total,
                        emotion,
                    });
                    emotion
                }
                Err(e) => {
                    warn!(
                        "Classification of message {} by '{}' failed, falling back to neutral: {}",
                        processed,
                        message.author(),
                        e
                    );
                    outcome.failures += 1;
                    on_progress(ClassificationProgress::Fallback {
                        processed,
                        total,
                        reason: e.to_string(),
                    });
                    EmotionLabel::Neutral
                }
            };

            outcome
                .messages
                .push(ClassifiedMessage::new(message.author(), emotion, message.text()));
        }

        outcome
    }
}

/// 选出置信度最高的标签
///
/// 并列时取分类器返回顺序中的第一个；该顺序是否稳定取决于分类器本身。
/// NaN 分数被忽略。
pub fn select_top(scores: &[LabelScore]) -> Option<&LabelScore> {
    scores
        .iter()
        .filter(|candidate| !candidate.score.is_nan())
        .fold(None, |best: Option<&LabelScore>, candidate| match best {
            Some(current) if candidate.score <= current.score => Some(current),
            _ => Some(candidate),
        })
}
