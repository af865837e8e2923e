// Transcript Ports Layer

mod transcript_repository;

pub use transcript_repository::*;
