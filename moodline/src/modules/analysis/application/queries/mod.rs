mod aggregate_report;

pub use aggregate_report::*;
