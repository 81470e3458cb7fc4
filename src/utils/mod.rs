pub mod constants;
pub mod filename;
pub mod logging;
pub mod progress;

pub use constants::*;
pub use filename::{is_raw_data_file, parse_capture_time, raw_data_filename};
pub use logging::init_logging;
pub use progress::ProgressReporter;
