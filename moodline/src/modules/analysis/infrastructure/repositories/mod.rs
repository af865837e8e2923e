mod file_report_repository;
mod in_memory_report_repository;

pub use file_report_repository::*;
pub use in_memory_report_repository::*;
