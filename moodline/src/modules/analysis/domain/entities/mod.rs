mod classified_message;
mod report;

pub use classified_message::*;
pub use report::*;
