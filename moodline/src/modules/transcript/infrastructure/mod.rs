// Transcript Infrastructure Layer

mod file_transcript_repository;
mod in_memory_transcript_repository;

pub use file_transcript_repository::*;
pub use in_memory_transcript_repository::*;
