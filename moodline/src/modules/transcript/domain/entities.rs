use serde::{Deserialize, Serialize};

/// 只有该类型的记录才会进入分析流程
pub const MESSAGE_KIND: &str = "message";

/// 导出的聊天记录
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub messages: Vec<RawMessage>,
}

impl Transcript {
    pub fn new(messages: Vec<RawMessage>) -> Self {
        Self {
            name: None,
            messages,
        }
    }
}

/// 原始消息记录
///
/// 缺少 `type` 字段时按普通消息处理，清洗后的文件使用 `author` 而非 `from`，
/// 因此清洗结果可以再次作为输入。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMessage {
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub text: TextContent,
}

fn default_kind() -> String {
    MESSAGE_KIND.to_string()
}

impl RawMessage {
    /// 创建普通消息
    pub fn message(from: impl Into<String>, text: impl Into<TextContent>) -> Self {
        Self::with_kind(MESSAGE_KIND, from, text)
    }

    /// 创建指定类型的消息
    pub fn with_kind(
        kind: impl Into<String>,
        from: impl Into<String>,
        text: impl Into<TextContent>,
    ) -> Self {
        Self {
            kind: kind.into(),
            from: Some(from.into()),
            author: None,
            text: text.into(),
        }
    }

    pub fn is_message(&self) -> bool {
        self.kind == MESSAGE_KIND
    }

    /// 作者标识，`from` 优先
    pub fn author(&self) -> &str {
        self.from
            .as_deref()
            .or(self.author.as_deref())
            .unwrap_or_default()
    }
}

/// 消息文本：纯字符串或片段序列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextContent {
    Plain(String),
    Fragments(Vec<Fragment>),
    /// 无法识别的结构，不贡献任何文本
    Unrecognized(serde_json::Value),
}

impl TextContent {
    /// 按顺序拼接全部文本片段
    pub fn extract(&self) -> String {
        match self {
            TextContent::Plain(text) => text.clone(),
            TextContent::Fragments(fragments) => {
                let mut buffer = String::new();
                for fragment in fragments {
                    fragment.append_to(&mut buffer);
                }
                buffer
            }
            TextContent::Unrecognized(_) => String::new(),
        }
    }
}

impl Default for TextContent {
    fn default() -> Self {
        TextContent::Plain(String::new())
    }
}

impl From<&str> for TextContent {
    fn from(text: &str) -> Self {
        TextContent::Plain(text.to_string())
    }
}

impl From<String> for TextContent {
    fn from(text: String) -> Self {
        TextContent::Plain(text)
    }
}

impl From<Vec<Fragment>> for TextContent {
    fn from(fragments: Vec<Fragment>) -> Self {
        TextContent::Fragments(fragments)
    }
}

/// 文本片段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fragment {
    Plain(String),
    /// 带格式标注的片段（链接、加粗、提及等），只取 `text`
    Annotated { text: serde_json::Value },
    Unrecognized(serde_json::Value),
}

impl Fragment {
    pub fn annotated(text: impl Into<String>) -> Self {
        Fragment::Annotated {
            text: serde_json::Value::String(text.into()),
        }
    }

    fn append_to(&self, buffer: &mut String) {
        match self {
            Fragment::Plain(text) => buffer.push_str(text),
            Fragment::Annotated { text } => match text {
                serde_json::Value::String(s) => buffer.push_str(s),
                serde_json::Value::Null => {}
                other => buffer.push_str(&other.to_string()),
            },
            Fragment::Unrecognized(_) => {}
        }
    }
}

/// 规范化后的消息
///
/// 文本已去除首尾空白且保证非空
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedMessage {
    author: String,
    text: String,
}

impl NormalizedMessage {
    /// 文本去空白后为空时返回 None
    pub fn new(author: impl Into<String>, text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            author: author.into(),
            text: text.to_string(),
        })
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// 清洗后的聊天记录
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleanedTranscript {
    pub messages: Vec<NormalizedMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_telegram_export() {
        let json = r#"{
            "name": "Chat",
            "type": "personal_chat",
            "messages": [
                {"id": 1, "type": "message", "from": "A", "text": "hello"},
                {"id": 2, "type": "service", "actor": "A", "action": "pin_message", "text": ""},
                {"id": 3, "type": "message", "from": "B", "text": [
                    "see ",
                    {"type": "link", "text": "example.com"},
                    {"type": "bold", "text": 42},
                    {"type": "custom_emoji", "document_id": "x"}
                ]}
            ]
        }"#;

        let transcript: Transcript = serde_json::from_str(json).unwrap();
        assert_eq!(transcript.messages.len(), 3);
        assert!(transcript.messages[0].is_message());
        assert!(!transcript.messages[1].is_message());
        assert_eq!(transcript.messages[2].text.extract(), "see example.com42");
    }

    #[test]
    fn test_cleaned_file_is_valid_input() {
        let json = r#"{"messages": [{"author": "A", "text": "hi"}]}"#;
        let transcript: Transcript = serde_json::from_str(json).unwrap();

        assert!(transcript.messages[0].is_message());
        assert_eq!(transcript.messages[0].author(), "A");
    }

    #[test]
    fn test_unrecognized_text_shape() {
        let json = r#"{"type": "message", "from": "A", "text": {"weird": true}}"#;
        let message: RawMessage = serde_json::from_str(json).unwrap();
        assert_eq!(message.text.extract(), "");
    }

    #[test]
    fn test_annotated_text_coercion() {
        let text: TextContent = serde_json::from_str(
            r#"[{"text": null}, {"text": true}, {"text": 1.5}, {"text": ["a", 1]}, "!"]"#,
        )
        .unwrap();

        // null 不产生文本，其他非字符串值按紧凑 JSON 渲染
        assert_eq!(text.extract(), "true1.5[\"a\",1]!");
    }

    #[test]
    fn test_normalized_message_rejects_blank() {
        assert!(NormalizedMessage::new("A", "   \n").is_none());
        let msg = NormalizedMessage::new("A", "  hi ").unwrap();
        assert_eq!(msg.text(), "hi");
    }
}
