// Analysis Ports Layer
// 端口定义了模块与外部世界的接口

mod classifier_port;
mod report_repository;

pub use classifier_port::*;
pub use report_repository::*;
