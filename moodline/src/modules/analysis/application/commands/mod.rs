mod analyze_transcript;

pub use analyze_transcript::*;
