use std::path::Path;

use crate::error::{Result, WeatherError};
use crate::models::DailySummary;

pub struct SummaryReader;

impl SummaryReader {
    pub fn new() -> Self {
        Self
    }

    /// Load `daily_summary.csv`. A summary that does not exist yet is
    /// reported as `DataEmpty` rather than an I/O failure.
    pub fn read(&self, path: &Path) -> Result<Vec<DailySummary>> {
        if !path.exists() {
            return Err(WeatherError::DataEmpty(format!(
                "Summary file {} does not exist yet",
                path.display()
            )));
        }

        let mut reader = csv::Reader::from_path(path)?;
        let mut rows = Vec::new();
        for row in reader.deserialize() {
            rows.push(row?);
        }
        Ok(rows)
    }
}

impl Default for SummaryReader {
    fn default() -> Self {
        Self::new()
    }
}
