// Transcript Module - 聊天记录模块
//
// - domain: 原始记录与规范化消息，规范化服务
// - ports: 聊天记录仓储端口
// - infrastructure: 文件与内存仓储实现
// - application: 清洗命令处理器

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{
    CommandHandler, NormalizeTranscriptCommand, NormalizeTranscriptHandler,
    NormalizeTranscriptResponse,
};

pub use domain::{
    CleanedTranscript, Fragment, MessageNormalizer, NormalizationOutcome, NormalizedMessage,
    RawMessage, TextContent, Transcript,
};

pub use infrastructure::{FileTranscriptRepository, InMemoryTranscriptRepository};

pub use ports::{RepositoryError, TranscriptRepository};
