// Keyword Adapter - 离线关键词分类器
//
// 不依赖模型服务，按关键词和表情符号命中次数给出 CEDR 标签空间上的分数

use async_trait::async_trait;

use crate::modules::analysis::ports::{
    ClassificationError, ClassifierConfig, ClassifierInfo, ClassifierPort, LabelScore,
    ProviderType,
};

/// 无情感标签
const NO_EMOTION: &str = "no_emotion";

/// 标签空间（返回顺序）
const LABELS: [&str; 6] = [NO_EMOTION, "joy", "sadness", "surprise", "fear", "anger"];

/// 词前缀
const WORD_PREFIXES: [(&str, &[&str]); 5] = [
    (
        "joy",
        &[
            "радост", "счастл", "ура", "отлично", "класс", "люблю", "спасиб", "хаха", "ахах",
            "happy", "great", "love", "thank", "haha", "lol",
        ],
    ),
    (
        "sadness",
        &[
            "грус", "печал", "жаль", "скуча", "плач", "плак", "тоск", "sad", "sorry", "unhappy",
            "cry",
        ],
    ),
    ("surprise", &["вау", "неужел", "внезапн", "wow", "omg", "whoa"]),
    (
        "fear",
        &[
            "страш", "боюс", "тревож", "пуга", "испуг", "afraid", "scared", "fear", "worr",
            "panic",
        ],
    ),
    (
        "anger",
        &[
            "злю", "злит", "бесит", "бешен", "ненавиж", "раздраж", "angry", "hate", "furious",
            "annoy",
        ],
    ),
];

/// 表情符号与颜文字
const SYMBOLS: [(&str, &[&str]); 5] = [
    ("joy", &["😊", "😄", "😂", "❤", ":)", ")))"]),
    ("sadness", &["😢", "😭", ":(", "((("]),
    ("surprise", &["😮", "😲", "!?"]),
    ("fear", &["😨", "😱"]),
    ("anger", &["😠", "😡", "🤬"]),
];

/// 关键词分类器
pub struct KeywordClassifier {
    id: String,
}

impl KeywordClassifier {
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            id: config.id.clone(),
        }
    }

    /// 统计各标签命中次数
    fn count_hits(text: &str) -> [usize; LABELS.len()] {
        let mut hits = [0usize; LABELS.len()];
        let lowered = text.to_lowercase();

        for word in lowered.split(|c: char| !c.is_alphanumeric()) {
            if word.is_empty() {
                continue;
            }
            for (label, prefixes) in WORD_PREFIXES.iter() {
                if prefixes.iter().any(|prefix| word.starts_with(prefix)) {
                    hits[Self::label_index(label)] += 1;
                }
            }
        }

        for (label, symbols) in SYMBOLS.iter() {
            let count: usize = symbols
                .iter()
                .map(|symbol| lowered.matches(symbol).count())
                .sum();
            hits[Self::label_index(label)] += count;
        }

        hits
    }

    fn label_index(label: &str) -> usize {
        LABELS.iter().position(|l| *l == label).unwrap_or(0)
    }

    /// 计算标签空间上的分数，未命中时 no_emotion 为 1.0
    pub fn score(text: &str) -> Vec<LabelScore> {
        let hits = Self::count_hits(text);
        let total: usize = hits.iter().sum();

        LABELS
            .iter()
            .zip(hits.iter())
            .map(|(label, count)| {
                let score = if total == 0 {
                    if *label == NO_EMOTION {
                        1.0
                    } else {
                        0.0
                    }
                } else {
                    *count as f64 / total as f64
                };
                LabelScore::new(*label, score)
            })
            .collect()
    }
}

#[async_trait]
impl ClassifierPort for KeywordClassifier {
    fn provider_id(&self) -> &str {
        &self.id
    }

    fn info(&self) -> ClassifierInfo {
        ClassifierInfo {
            id: self.id.clone(),
            provider_type: ProviderType::Keyword,
            model: "keyword-lexicon".to_string(),
        }
    }

    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>, ClassificationError> {
        Ok(Self::score(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top(text: &str) -> String {
        let scores = KeywordClassifier::score(text);
        let mut best = &scores[0];
        for candidate in &scores {
            if candidate.score > best.score {
                best = candidate;
            }
        }
        best.label.clone()
    }

    #[test]
    fn test_covers_full_label_space() {
        let scores = KeywordClassifier::score("что-нибудь");
        let labels: Vec<&str> = scores.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, LABELS.to_vec());
        assert_eq!(scores[0].score, 1.0);
    }

    #[test]
    fn test_detects_emotions() {
        assert_eq!(top("Ура, я так счастлива!"), "joy");
        assert_eq!(top("мне очень грустно 😢"), "sadness");
        assert_eq!(top("Меня это бесит"), "anger");
        assert_eq!(top("I'm scared of the dark"), "fear");
        assert_eq!(top("обычный текст"), NO_EMOTION);
    }

    #[test]
    fn test_prefix_match_is_word_anchored() {
        // "культура" 不应命中 "ура"
        assert_eq!(top("культура"), NO_EMOTION);
    }

    #[tokio::test]
    async fn test_port_returns_scores() {
        let classifier = KeywordClassifier::new(&ClassifierConfig::default());
        let scores = classifier.classify("haha love it").await.unwrap();
        let sum: f64 = scores.iter().map(|s| s.score).sum();

        assert!((sum - 1.0).abs() < 1e-9);
        assert_eq!(classifier.info().model, "keyword-lexicon");
    }
}
