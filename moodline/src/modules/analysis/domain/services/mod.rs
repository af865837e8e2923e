mod aggregator;
mod emotion_classifier;

pub use aggregator::*;
pub use emotion_classifier::*;
