// Config Infrastructure Layer

mod file_repository;
mod memory_repository;

pub use file_repository::{FileConfigRepository, DEFAULT_CONFIG_FILE};
pub use memory_repository::InMemoryConfigRepository;
