// Classifier Adapters
// 各种文本分类提供商的适配器实现

mod huggingface;
mod keyword;
mod registry;

pub use huggingface::*;
pub use keyword::*;
pub use registry::*;
