// CLI 命令实现
//
// 每个子命令对应一个函数，返回 AppResult，由 main 统一报告错误

pub mod analyze;
pub mod clean;
pub mod config;
pub mod stats;

pub use analyze::*;
pub use clean::*;
pub use config::*;
pub use stats::*;
