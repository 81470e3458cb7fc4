use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Result, WeatherError};
use crate::models::{DailySummary, WeatherReading};
use crate::utils::filename::raw_data_filename;

/// Writes one raw CSV snapshot per poll cycle.
pub struct RawDataWriter {
    data_dir: PathBuf,
}

impl RawDataWriter {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Persist a batch of readings captured now.
    pub fn persist(&self, readings: &[WeatherReading]) -> Result<PathBuf> {
        self.persist_at(readings, &Local::now())
    }

    /// Persist a batch under the file name for `captured_at`.
    ///
    /// The file is created with `create_new`, so an existing snapshot is
    /// never overwritten; a same-second collision surfaces as an I/O error.
    pub fn persist_at(
        &self,
        readings: &[WeatherReading],
        captured_at: &DateTime<Local>,
    ) -> Result<PathBuf> {
        if readings.is_empty() {
            return Err(WeatherError::DataEmpty(
                "Refusing to write an empty snapshot".to_string(),
            ));
        }

        fs::create_dir_all(&self.data_dir)?;
        let path = self.data_dir.join(raw_data_filename(captured_at));

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)?;
        let mut writer = csv::Writer::from_writer(file);
        for reading in readings {
            writer.serialize(reading)?;
        }
        writer.flush()?;

        info!(
            file = %path.display(),
            readings = readings.len(),
            "Stored weather snapshot"
        );
        Ok(path)
    }
}

/// Replaces the summary table in one step.
pub struct SummaryWriter;

impl SummaryWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write all rows to a temp file beside `path`, then rename it into place,
    /// so readers see either the old table or the new one.
    pub fn write(&self, summaries: &[DailySummary], path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = csv::Writer::from_writer(&mut tmp);
            for summary in summaries {
                writer.serialize(summary)?;
            }
            writer.flush()?;
        }
        tmp.as_file_mut().flush()?;
        tmp.persist(path).map_err(|e| e.error)?;

        debug!(file = %path.display(), rows = summaries.len(), "Wrote daily summary");
        Ok(())
    }
}

impl Default for SummaryWriter {
    fn default() -> Self {
        Self::new()
    }
}
