pub mod raw_reader;
pub mod summary_reader;

pub use raw_reader::RawDataReader;
pub use summary_reader::SummaryReader;
