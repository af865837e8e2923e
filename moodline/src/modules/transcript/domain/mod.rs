// Transcript Domain Layer
// 领域层：原始记录、规范化消息与规范化服务

pub mod entities;
pub mod services;

pub use entities::*;
pub use services::{MessageNormalizer, NormalizationOutcome};
