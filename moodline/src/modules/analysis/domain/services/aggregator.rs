use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::super::entities::ClassifiedMessage;
use super::super::value_objects::EmotionLabel;

/// 平滑窗口下限
pub const MIN_WINDOW_SIZE: usize = 10;
/// 窗口随消息总数增长的除数
pub const WINDOW_DIVISOR: usize = 20;

/// 单个情感的数量与占比
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelShare {
    pub emotion: EmotionLabel,
    pub count: usize,
    pub percentage: f64,
}

/// 情感分布
///
/// 只列出出现过的情感，按数量降序，数量相同按规范顺序
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelDistribution {
    pub total: usize,
    pub shares: Vec<LabelShare>,
}

impl LabelDistribution {
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = EmotionLabel>,
    {
        let mut counts: BTreeMap<EmotionLabel, usize> = BTreeMap::new();
        for label in labels {
            *counts.entry(label).or_insert(0) += 1;
        }

        let total: usize = counts.values().sum();
        if total == 0 {
            return Self::default();
        }

        let mut shares: Vec<LabelShare> = counts
            .into_iter()
            .map(|(emotion, count)| LabelShare {
                emotion,
                count,
                percentage: count as f64 / total as f64 * 100.0,
            })
            .collect();
        // 稳定排序，BTreeMap 已按规范顺序给出
        shares.sort_by(|a, b| b.count.cmp(&a.count));

        Self { total, shares }
    }

    pub fn count(&self, emotion: EmotionLabel) -> usize {
        self.shares
            .iter()
            .find(|share| share.emotion == emotion)
            .map(|share| share.count)
            .unwrap_or(0)
    }

    pub fn percentage(&self, emotion: EmotionLabel) -> f64 {
        self.shares
            .iter()
            .find(|share| share.emotion == emotion)
            .map(|share| share.percentage)
            .unwrap_or(0.0)
    }
}

/// 平滑序列中的一个点
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothedPoint {
    /// 作者内的序号（从 1 开始）
    pub sequence: usize,
    /// 全局消息序号（从 1 开始）
    pub message_order: usize,
    pub score: f64,
}

/// 单个作者的心情统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorMood {
    pub author: String,
    pub message_count: usize,
    pub distribution: LabelDistribution,
    pub mean_mood: f64,
    pub series: Vec<SmoothedPoint>,
}

/// 聚合报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub total_messages: usize,
    pub window_size: usize,
    pub distribution: LabelDistribution,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_mood: Option<f64>,
    /// 按作者首次出现的顺序
    pub authors: Vec<AuthorMood>,
}

impl AggregateReport {
    pub fn author(&self, name: &str) -> Option<&AuthorMood> {
        self.authors.iter().find(|author| author.author == name)
    }
}

/// 平滑窗口大小：max(10, N / 20)
pub fn window_size(total_messages: usize) -> usize {
    MIN_WINDOW_SIZE.max(total_messages / WINDOW_DIVISOR)
}

/// 居中移动平均
///
/// 位置 i 的值为 [i - window/2, i + window/2] 内样本的均值，
/// 靠近边界时窗口被截断，至少包含一个样本
pub fn centered_moving_average(scores: &[u8], window: usize) -> Vec<f64> {
    let half = window / 2;
    let mut prefix: Vec<u64> = Vec::with_capacity(scores.len() + 1);
    prefix.push(0);
    for score in scores {
        let last = prefix[prefix.len() - 1];
        prefix.push(last + u64::from(*score));
    }

    (0..scores.len())
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half).min(scores.len() - 1);
            let sum = prefix[hi + 1] - prefix[lo];
            sum as f64 / (hi - lo + 1) as f64
        })
        .collect()
}

/// 心情聚合服务
///
/// 领域服务：从已分类消息序列重新计算全部统计，不修改输入
#[derive(Debug, Clone, Default)]
pub struct MoodAggregator;

impl MoodAggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn aggregate(&self, messages: &[ClassifiedMessage]) -> AggregateReport {
        let total_messages = messages.len();
        let window = window_size(total_messages);

        // (作者, [(全局序号, 情感)])，按首次出现排序
        let mut groups: Vec<(&str, Vec<(usize, EmotionLabel)>)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for (index, message) in messages.iter().enumerate() {
            let slot = *positions.entry(message.author()).or_insert_with(|| {
                groups.push((message.author(), Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push((index + 1, message.emotion()));
        }

        let authors = groups
            .into_iter()
            .map(|(author, entries)| Self::author_mood(author, &entries, window))
            .collect();

        AggregateReport {
            total_messages,
            window_size: window,
            distribution: LabelDistribution::from_labels(messages.iter().map(|m| m.emotion())),
            mean_mood: mean(messages.iter().map(|m| m.mood_score().value())),
            authors,
        }
    }

    fn author_mood(author: &str, entries: &[(usize, EmotionLabel)], window: usize) -> AuthorMood {
        let scores: Vec<u8> = entries
            .iter()
            .map(|(_, emotion)| emotion.mood_score().value())
            .collect();

        let series = centered_moving_average(&scores, window)
            .into_iter()
            .zip(entries)
            .enumerate()
            .map(|(i, (score, (message_order, _)))| SmoothedPoint {
                sequence: i + 1,
                message_order: *message_order,
                score,
            })
            .collect();

        AuthorMood {
            author: author.to_string(),
            message_count: entries.len(),
            distribution: LabelDistribution::from_labels(entries.iter().map(|(_, e)| *e)),
            mean_mood: mean(scores.iter().copied()).unwrap_or_default(),
            series,
        }
    }
}

fn mean<I>(scores: I) -> Option<f64>
where
    I: IntoIterator<Item = u8>,
{
    let (sum, count) = scores
        .into_iter()
        .fold((0u64, 0usize), |(sum, count), score| {
            (sum + u64::from(score), count + 1)
        });
    if count == 0 {
        None
    } else {
        Some(sum as f64 / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classified(items: &[(&str, EmotionLabel)]) -> Vec<ClassifiedMessage> {
        items
            .iter()
            .enumerate()
            .map(|(i, (author, emotion))| {
                ClassifiedMessage::new(*author, *emotion, &format!("message {}", i))
            })
            .collect()
    }

    fn alternating(count: usize) -> Vec<ClassifiedMessage> {
        (0..count)
            .map(|i| {
                let emotion = if i % 2 == 0 {
                    EmotionLabel::Joy
                } else {
                    EmotionLabel::Sadness
                };
                ClassifiedMessage::new("A", emotion, "x")
            })
            .collect()
    }

    #[test]
    fn test_window_size_heuristic() {
        assert_eq!(window_size(0), 10);
        assert_eq!(window_size(25), 10);
        assert_eq!(window_size(219), 10);
        assert_eq!(window_size(220), 11);
        assert_eq!(window_size(1000), 50);
    }

    #[test]
    fn test_smoothed_value_in_window_interior() {
        let report = MoodAggregator::new().aggregate(&alternating(25));
        let series = &report.author("A").unwrap().series;

        assert_eq!(report.window_size, 10);
        // 第 13 条：第 8..=18 条共 11 个样本，5 个 joy(9) + 6 个 sadness(3)
        let expected = (5.0 * 9.0 + 6.0 * 3.0) / 11.0;
        assert!((series[12].score - expected).abs() < 1e-12);
        assert_eq!(series[12].sequence, 13);
    }

    #[test]
    fn test_window_narrows_at_boundaries() {
        let report = MoodAggregator::new().aggregate(&alternating(25));
        let series = &report.author("A").unwrap().series;

        // 第 1 条：第 1..=6 条，3 个 joy + 3 个 sadness
        assert!((series[0].score - 6.0).abs() < 1e-12);
        // 第 25 条：第 20..=25 条，3 个 joy + 3 个 sadness
        assert!((series[24].score - 6.0).abs() < 1e-12);
        assert_eq!(series.len(), 25);
    }

    #[test]
    fn test_single_message_series() {
        assert_eq!(centered_moving_average(&[9], 10), vec![9.0]);
        assert!(centered_moving_average(&[], 10).is_empty());
    }

    #[test]
    fn test_per_author_statistics() {
        let messages = classified(&[
            ("B", EmotionLabel::Joy),
            ("A", EmotionLabel::Fear),
            ("B", EmotionLabel::Sadness),
            ("A", EmotionLabel::Fear),
            ("B", EmotionLabel::Joy),
        ]);

        let report = MoodAggregator::new().aggregate(&messages);

        let names: Vec<&str> = report.authors.iter().map(|a| a.author.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);

        let b = report.author("B").unwrap();
        assert_eq!(b.message_count, 3);
        assert!((b.mean_mood - 7.0).abs() < 1e-12);
        assert_eq!(b.distribution.count(EmotionLabel::Joy), 2);
        assert_eq!(b.distribution.shares[0].emotion, EmotionLabel::Joy);

        let orders: Vec<usize> = b.series.iter().map(|p| p.message_order).collect();
        assert_eq!(orders, vec![1, 3, 5]);
        let sequences: Vec<usize> = b.series.iter().map(|p| p.sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3]);

        let a = report.author("A").unwrap();
        assert!((a.mean_mood - 1.0).abs() < 1e-12);
        assert!((a.distribution.percentage(EmotionLabel::Fear) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let messages = classified(&[
            ("A", EmotionLabel::Joy),
            ("A", EmotionLabel::Neutral),
            ("A", EmotionLabel::Anger),
            ("B", EmotionLabel::Fear),
            ("B", EmotionLabel::Fear),
            ("B", EmotionLabel::Sadness),
            ("C", EmotionLabel::Neutral),
        ]);

        let report = MoodAggregator::new().aggregate(&messages);

        let sum = |d: &LabelDistribution| d.shares.iter().map(|s| s.percentage).sum::<f64>();
        assert!((sum(&report.distribution) - 100.0).abs() < 1e-9);
        for author in &report.authors {
            assert!((sum(&author.distribution) - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_distribution_ordering() {
        let distribution = LabelDistribution::from_labels(vec![
            EmotionLabel::Joy,
            EmotionLabel::Anger,
            EmotionLabel::Anger,
            EmotionLabel::Neutral,
        ]);

        let order: Vec<EmotionLabel> = distribution.shares.iter().map(|s| s.emotion).collect();
        assert_eq!(
            order,
            vec![EmotionLabel::Anger, EmotionLabel::Neutral, EmotionLabel::Joy]
        );
    }

    #[test]
    fn test_empty_corpus() {
        let report = MoodAggregator::new().aggregate(&[]);

        assert_eq!(report.total_messages, 0);
        assert_eq!(report.window_size, 10);
        assert!(report.distribution.shares.is_empty());
        assert!(report.mean_mood.is_none());
        assert!(report.authors.is_empty());
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let messages = alternating(57);
        let aggregator = MoodAggregator::new();

        let first = aggregator.aggregate(&messages);
        let second = aggregator.aggregate(&messages);

        assert_eq!(first, second);
        assert_eq!(messages, alternating(57));
    }
}
