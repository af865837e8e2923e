use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::modules::transcript::{
    CommandHandler, FileTranscriptRepository, NormalizeTranscriptCommand,
    NormalizeTranscriptHandler,
};
use crate::shared::AppResult;

/// 清洗结果摘要
#[derive(Debug, Clone)]
pub struct CleanSummary {
    pub output: PathBuf,
    pub kept: usize,
    pub skipped: usize,
}

/// 清洗聊天记录并写出 `{"messages": [{author, text}]}`
pub async fn clean(input: &Path, output: Option<PathBuf>) -> AppResult<CleanSummary> {
    let mut repository = FileTranscriptRepository::new(input);
    if let Some(output) = output {
        repository = repository.with_cleaned_path(output);
    }
    let output = repository.cleaned_path().to_path_buf();

    let handler = NormalizeTranscriptHandler::new(Arc::new(repository));
    let response = handler.handle(NormalizeTranscriptCommand::new(true)).await?;

    let summary = CleanSummary {
        output,
        kept: response.cleaned.messages.len(),
        skipped: response.skipped(),
    };

    println!("Cleaned {} messages", summary.kept);
    println!("Skipped {} messages", summary.skipped);
    println!("Saved to {}", summary.output.display());

    Ok(summary)
}
