use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 情感标签
///
/// 值对象：领域内封闭的五值情感词表，与具体分类模型的原始标签无关
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum EmotionLabel {
    /// 中性
    #[default]
    Neutral,
    /// 悲伤
    Sadness,
    /// 恐惧
    Fear,
    /// 愤怒
    Anger,
    /// 喜悦
    Joy,
}

impl EmotionLabel {
    /// 获取所有情感标签（规范顺序）
    pub fn all() -> &'static [EmotionLabel] {
        &[
            EmotionLabel::Neutral,
            EmotionLabel::Sadness,
            EmotionLabel::Fear,
            EmotionLabel::Anger,
            EmotionLabel::Joy,
        ]
    }

    /// 英文代码
    pub fn code(&self) -> &'static str {
        match self {
            EmotionLabel::Neutral => "neutral",
            EmotionLabel::Sadness => "sadness",
            EmotionLabel::Fear => "fear",
            EmotionLabel::Anger => "anger",
            EmotionLabel::Joy => "joy",
        }
    }

    /// 本地化显示名称，也是报告中的序列化形式
    pub fn display_name(&self) -> &'static str {
        match self {
            EmotionLabel::Neutral => "нейтральное",
            EmotionLabel::Sadness => "грусть",
            EmotionLabel::Fear => "страх",
            EmotionLabel::Anger => "злость",
            EmotionLabel::Joy => "радость",
        }
    }

    /// 宽松解析：无法识别的名称视为中性
    pub fn from_name_lossy(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for EmotionLabel {
    type Err = String;

    /// 接受英文代码或显示名称
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        EmotionLabel::all()
            .iter()
            .copied()
            .find(|label| label.code() == needle || label.display_name() == needle)
            .ok_or_else(|| format!("Unknown emotion: {}", s))
    }
}

impl Serialize for EmotionLabel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.display_name())
    }
}

impl<'de> Deserialize<'de> for EmotionLabel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(EmotionLabel::from_name_lossy(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_code_and_display_name() {
        assert_eq!("joy".parse::<EmotionLabel>().unwrap(), EmotionLabel::Joy);
        assert_eq!("Anger".parse::<EmotionLabel>().unwrap(), EmotionLabel::Anger);
        assert_eq!("грусть".parse::<EmotionLabel>().unwrap(), EmotionLabel::Sadness);
        assert!("surprise".parse::<EmotionLabel>().is_err());
    }

    #[test]
    fn test_serde_uses_display_name() {
        let json = serde_json::to_string(&EmotionLabel::Fear).unwrap();
        assert_eq!(json, "\"страх\"");

        let label: EmotionLabel = serde_json::from_str("\"радость\"").unwrap();
        assert_eq!(label, EmotionLabel::Joy);

        let unknown: EmotionLabel = serde_json::from_str("\"удивление\"").unwrap();
        assert_eq!(unknown, EmotionLabel::Neutral);
    }
}
