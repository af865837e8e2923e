use tracing::{debug, info};

use super::super::entities::{NormalizedMessage, RawMessage};

/// 规范化结果
#[derive(Debug, Clone, Default)]
pub struct NormalizationOutcome {
    pub messages: Vec<NormalizedMessage>,
    /// 非 `message` 类型被跳过的数量
    pub skipped_non_message: usize,
    /// 文本为空被跳过的数量
    pub skipped_empty: usize,
}

impl NormalizationOutcome {
    pub fn skipped(&self) -> usize {
        self.skipped_non_message + self.skipped_empty
    }
}

/// 消息规范化服务
///
/// 领域服务：把原始记录转换为 `{author, text}`，保持输入顺序，不去重
#[derive(Debug, Clone, Default)]
pub struct MessageNormalizer;

impl MessageNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// 批量规范化
    pub fn normalize(&self, raw_messages: &[RawMessage]) -> NormalizationOutcome {
        let mut outcome = NormalizationOutcome {
            messages: Vec::with_capacity(raw_messages.len()),
            ..Default::default()
        };

        for raw in raw_messages {
            if !raw.is_message() {
                debug!("Skipping record of type '{}'", raw.kind);
                outcome.skipped_non_message += 1;
                continue;
            }

            match NormalizedMessage::new(raw.author(), &raw.text.extract()) {
                Some(message) => outcome.messages.push(message),
                None => outcome.skipped_empty += 1,
            }
        }

        info!(
            "Normalized {} messages, skipped {} ({} non-message, {} empty)",
            outcome.messages.len(),
            outcome.skipped(),
            outcome.skipped_non_message,
            outcome.skipped_empty
        );

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::transcript::domain::{Fragment, TextContent};

    #[test]
    fn test_normalize_mixed_records() {
        let raw = vec![
            RawMessage::message("A", "hello"),
            RawMessage::with_kind("service", "A", "x"),
            RawMessage::message(
                "B",
                vec![Fragment::annotated("he"), Fragment::annotated("llo")],
            ),
        ];

        let outcome = MessageNormalizer::new().normalize(&raw);

        assert_eq!(outcome.messages.len(), 2);
        assert_eq!(outcome.messages[0].author(), "A");
        assert_eq!(outcome.messages[0].text(), "hello");
        assert_eq!(outcome.messages[1].author(), "B");
        assert_eq!(outcome.messages[1].text(), "hello");
        assert_eq!(outcome.skipped_non_message, 1);
        assert_eq!(outcome.skipped_empty, 0);
    }

    #[test]
    fn test_empty_and_whitespace_text_skipped() {
        let raw = vec![
            RawMessage::message("A", ""),
            RawMessage::message("A", "  \t "),
            RawMessage::message("A", TextContent::Fragments(vec![])),
            RawMessage::message("A", " ok "),
        ];

        let outcome = MessageNormalizer::new().normalize(&raw);

        assert_eq!(outcome.messages.len(), 1);
        assert_eq!(outcome.messages[0].text(), "ok");
        assert_eq!(outcome.skipped_empty, 3);
        assert_eq!(outcome.skipped(), 3);
    }

    #[test]
    fn test_order_preserved_without_dedup() {
        let raw: Vec<RawMessage> = ["b", "a", "b", "c"]
            .iter()
            .map(|t| RawMessage::message("A", *t))
            .collect();

        let outcome = MessageNormalizer::new().normalize(&raw);
        let texts: Vec<&str> = outcome.messages.iter().map(|m| m.text()).collect();

        assert_eq!(texts, vec!["b", "a", "b", "c"]);
    }

    #[test]
    fn test_trim_applies_after_concatenation() {
        let raw = vec![RawMessage::message(
            "A",
            vec![
                Fragment::Plain("  first ".to_string()),
                Fragment::Unrecognized(serde_json::json!({"href": "x"})),
                Fragment::Plain(" second  ".to_string()),
            ],
        )];

        let outcome = MessageNormalizer::new().normalize(&raw);
        assert_eq!(outcome.messages[0].text(), "first  second");
    }
}
