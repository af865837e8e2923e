use serde::{Deserialize, Serialize};
use std::fmt;

use super::EmotionLabel;

/// 心情分数（0-10）
///
/// 值对象：只由情感标签经固定查表得到
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoodScore(u8);

impl MoodScore {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 10;

    /// 按名称取分，无法识别的名称按中性计 5 分
    pub fn from_name(name: &str) -> Self {
        Self::from(EmotionLabel::from_name_lossy(name))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl From<EmotionLabel> for MoodScore {
    fn from(label: EmotionLabel) -> Self {
        let score = match label {
            EmotionLabel::Joy => 9,
            EmotionLabel::Neutral => 5,
            EmotionLabel::Sadness => 3,
            EmotionLabel::Anger => 2,
            EmotionLabel::Fear => 1,
        };
        Self(score)
    }
}

impl EmotionLabel {
    pub fn mood_score(&self) -> MoodScore {
        MoodScore::from(*self)
    }
}

impl fmt::Display for MoodScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table() {
        assert_eq!(EmotionLabel::Joy.mood_score().value(), 9);
        assert_eq!(EmotionLabel::Neutral.mood_score().value(), 5);
        assert_eq!(EmotionLabel::Sadness.mood_score().value(), 3);
        assert_eq!(EmotionLabel::Anger.mood_score().value(), 2);
        assert_eq!(EmotionLabel::Fear.mood_score().value(), 1);
    }

    #[test]
    fn test_scores_within_range() {
        for label in EmotionLabel::all() {
            let score = label.mood_score().value();
            assert!((MoodScore::MIN..=MoodScore::MAX).contains(&score));
        }
    }

    #[test]
    fn test_unknown_name_scores_neutral() {
        assert_eq!(MoodScore::from_name("surprise").value(), 5);
        assert_eq!(MoodScore::from_name("злость").value(), 2);
    }
}
