// Transcript Application Layer

mod normalize_transcript;

pub use normalize_transcript::*;

use async_trait::async_trait;

/// 命令处理器 trait
#[async_trait]
pub trait CommandHandler<C> {
    type Output;
    type Error;

    async fn handle(&self, command: C) -> Result<Self::Output, Self::Error>;
}
