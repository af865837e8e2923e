// Analysis Infrastructure Layer
// 基础设施层：分类器适配器与报告仓储实现

pub mod adapters;
pub mod repositories;

pub use adapters::{ClassifierRegistry, HuggingFaceClassifier, KeywordClassifier};
pub use repositories::{FileReportRepository, InMemoryReportRepository};
