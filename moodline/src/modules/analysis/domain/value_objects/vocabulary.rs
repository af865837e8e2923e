use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::EmotionLabel;

/// 原始标签到领域情感的映射表
///
/// 保持插入顺序；表中不存在的原始标签一律映射为中性
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmotionVocabulary {
    entries: Vec<(String, EmotionLabel)>,
}

impl EmotionVocabulary {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// 添加映射，已存在的原始标签会被覆盖
    pub fn with_entry(mut self, raw: impl Into<String>, label: EmotionLabel) -> Self {
        let raw = raw.into();
        match self.entries.iter_mut().find(|(key, _)| *key == raw) {
            Some(entry) => entry.1 = label,
            None => self.entries.push((raw, label)),
        }
        self
    }

    /// 查找原始标签
    pub fn resolve(&self, raw: &str) -> Option<EmotionLabel> {
        self.entries
            .iter()
            .find(|(key, _)| key == raw)
            .map(|(_, label)| *label)
    }

    /// 映射原始标签，未知标签返回中性
    pub fn map(&self, raw: &str) -> EmotionLabel {
        self.resolve(raw).unwrap_or(EmotionLabel::Neutral)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, EmotionLabel)> {
        self.entries.iter().map(|(raw, label)| (raw.as_str(), *label))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EmotionVocabulary {
    /// rubert-tiny2-cedr 模型的映射表
    fn default() -> Self {
        EmotionLabel::all()
            .iter()
            .fold(Self::new(), |vocabulary, label| {
                vocabulary.with_entry(label.code(), *label)
            })
    }
}

impl Serialize for EmotionVocabulary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (raw, label) in &self.entries {
            map.serialize_entry(raw, label)?;
        }
        map.end()
    }
}

struct VocabularyVisitor;

impl<'de> Visitor<'de> for VocabularyVisitor {
    type Value = EmotionVocabulary;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of raw labels to emotions")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut vocabulary = EmotionVocabulary::new();
        while let Some((raw, label)) = access.next_entry::<String, EmotionLabel>()? {
            vocabulary = vocabulary.with_entry(raw, label);
        }
        Ok(vocabulary)
    }
}

impl<'de> Deserialize<'de> for EmotionVocabulary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(VocabularyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let vocabulary = EmotionVocabulary::default();
        assert_eq!(vocabulary.len(), 5);
        assert_eq!(vocabulary.map("joy"), EmotionLabel::Joy);
        assert_eq!(vocabulary.map("fear"), EmotionLabel::Fear);
    }

    #[test]
    fn test_unmapped_labels_fall_back_to_neutral() {
        let vocabulary = EmotionVocabulary::default();
        assert_eq!(vocabulary.resolve("no_emotion"), None);
        assert_eq!(vocabulary.map("no_emotion"), EmotionLabel::Neutral);
        assert_eq!(vocabulary.map("surprise"), EmotionLabel::Neutral);
        assert_eq!(vocabulary.map("JOY"), EmotionLabel::Neutral);
    }

    #[test]
    fn test_serialization_keeps_order() {
        let json = serde_json::to_string(&EmotionVocabulary::default()).unwrap();
        assert_eq!(
            json,
            r#"{"neutral":"нейтральное","sadness":"грусть","fear":"страх","anger":"злость","joy":"радость"}"#
        );

        let parsed: EmotionVocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, EmotionVocabulary::default());
    }
}
