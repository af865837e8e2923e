use serde::{Deserialize, Serialize};

use super::super::value_objects::{EmotionLabel, MoodScore};

/// 预览文本最大字符数
pub const PREVIEW_MAX_CHARS: usize = 100;
/// 预览被截断时追加的标记
pub const TRUNCATION_MARKER: &str = "...";

/// 已分类消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedMessage {
    author: String,
    emotion: EmotionLabel,
    /// 截断后的文本预览
    #[serde(rename = "text")]
    text_preview: String,
}

impl ClassifiedMessage {
    /// 创建已分类消息，文本按预览规则截断
    pub fn new(author: impl Into<String>, emotion: EmotionLabel, text: &str) -> Self {
        Self {
            author: author.into(),
            emotion,
            text_preview: preview(text),
        }
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn emotion(&self) -> EmotionLabel {
        self.emotion
    }

    pub fn text_preview(&self) -> &str {
        &self.text_preview
    }

    pub fn mood_score(&self) -> MoodScore {
        self.emotion.mood_score()
    }
}

/// 截断到 100 个字符，发生截断时追加 "..."
pub fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_MAX_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}
