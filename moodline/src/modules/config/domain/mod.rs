// Config Domain Layer

pub mod entities;

pub use entities::{
    AnalysisConfig, AppConfig, PartialAnalysisConfig, PartialAppConfig, PartialClassifierConfig,
    MAX_CONCURRENCY,
};
