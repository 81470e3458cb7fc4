use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, WeatherError};
use crate::models::WeatherReading;
use crate::utils::filename::is_raw_data_file;

pub struct RawDataReader;

impl RawDataReader {
    pub fn new() -> Self {
        Self
    }

    /// Read every reading from one raw snapshot
    pub fn read_file(&self, path: &Path) -> Result<Vec<WeatherReading>> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut readings = Vec::new();
        for row in reader.deserialize() {
            let reading: WeatherReading = row.map_err(|e| {
                WeatherError::InvalidFormat(format!("{}: {}", path.display(), e))
            })?;
            readings.push(reading);
        }
        Ok(readings)
    }

    /// List raw snapshots in `data_dir`, oldest capture first.
    ///
    /// A missing directory simply has no snapshots yet.
    pub fn list_files(&self, data_dir: &Path) -> Result<Vec<PathBuf>> {
        if !data_dir.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(data_dir)? {
            let path = entry?.path();
            if path.is_file() && is_raw_data_file(&path) {
                files.push(path);
            }
        }
        // Timestamped names sort chronologically
        files.sort();
        Ok(files)
    }
}

impl Default for RawDataReader {
    fn default() -> Self {
        Self::new()
    }
}
