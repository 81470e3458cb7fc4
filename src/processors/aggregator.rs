use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result;
use crate::models::{DailySummary, WeatherReading};
use crate::readers::RawDataReader;
use crate::writers::SummaryWriter;

#[derive(Debug)]
pub enum AggregateOutcome {
    /// Nothing unseen; the summary was left alone
    NoNewFiles,
    Updated {
        summaries: Vec<DailySummary>,
        new_readings: Vec<WeatherReading>,
        files: Vec<PathBuf>,
    },
}

/// Folds raw snapshots into the daily summary table.
///
/// Every reading folded in during this run is kept, and the whole table is
/// recomputed from them on each call.
pub struct Aggregator {
    summary_path: PathBuf,
    readings: Vec<WeatherReading>,
    reader: RawDataReader,
    writer: SummaryWriter,
}

impl Aggregator {
    pub fn new(summary_path: impl Into<PathBuf>) -> Self {
        Self {
            summary_path: summary_path.into(),
            readings: Vec::new(),
            reader: RawDataReader::new(),
            writer: SummaryWriter::new(),
        }
    }

    pub fn summary_path(&self) -> &Path {
        &self.summary_path
    }

    pub fn held_readings(&self) -> &[WeatherReading] {
        &self.readings
    }

    /// Read `unseen_files`, recompute the per-date table and replace the
    /// summary file. State only changes once the new table is on disk.
    pub fn aggregate(&mut self, unseen_files: &[PathBuf]) -> Result<AggregateOutcome> {
        if unseen_files.is_empty() {
            info!("No new files to process");
            return Ok(AggregateOutcome::NoNewFiles);
        }

        let mut files = unseen_files.to_vec();
        files.sort();

        let mut new_readings = Vec::new();
        for file in &files {
            new_readings.extend(self.reader.read_file(file)?);
        }

        let mut all_readings = self.readings.clone();
        all_readings.extend(new_readings.iter().cloned());
        let summaries = summarize(&all_readings)?;

        self.writer.write(&summaries, &self.summary_path)?;
        self.readings = all_readings;

        info!(
            files = files.len(),
            new_readings = new_readings.len(),
            days = summaries.len(),
            "Updated daily summary"
        );

        Ok(AggregateOutcome::Updated {
            summaries,
            new_readings,
            files,
        })
    }
}

/// Group readings by calendar date and compute one summary per date,
/// ordered by date.
pub fn summarize(readings: &[WeatherReading]) -> Result<Vec<DailySummary>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&WeatherReading>> = BTreeMap::new();
    for reading in readings {
        by_date.entry(reading.date()?).or_default().push(reading);
    }

    by_date
        .into_iter()
        .map(|(date, day_readings)| DailySummary::from_readings(date, &day_readings))
        .collect()
}
