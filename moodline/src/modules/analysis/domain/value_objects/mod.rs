mod emotion;
mod mood_score;
mod vocabulary;

pub use emotion::*;
pub use mood_score::*;
pub use vocabulary::*;
