// Modules Layer - 业务模块
//
// 按照六边形架构组织的业务模块：
// - transcript: 聊天记录读取与规范化
// - analysis: 情感分类、报告与心情聚合
// - config: 配置模块，处理分类器与分析设置

pub mod analysis;
pub mod config;
pub mod transcript;

pub use analysis::AnalysisModule;
pub use config::ConfigModule;
