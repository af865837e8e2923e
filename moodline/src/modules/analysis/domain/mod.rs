// Analysis Domain Layer
// 领域层包含情感值对象、已分类消息实体和分类/聚合领域服务

pub mod entities;
pub mod services;
pub mod value_objects;

// 重导出常用类型
pub use entities::{preview, AnalysisInfo, AnalysisReport, ClassifiedMessage};
pub use services::{
    AggregateReport, AuthorMood, ClassificationOutcome, ClassificationProgress,
    EmotionClassifier, LabelDistribution, LabelShare, MoodAggregator, SmoothedPoint,
};
pub use value_objects::{EmotionLabel, EmotionVocabulary, MoodScore};
