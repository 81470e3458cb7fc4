pub mod aggregator;
pub mod alert_checker;
pub mod file_tracker;

pub use aggregator::{summarize, AggregateOutcome, Aggregator};
pub use alert_checker::AlertChecker;
pub use file_tracker::FileTracker;
