use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info};

use crate::error::Result;
use crate::fetchers::WeatherSource;
use crate::models::AlertEvent;
use crate::processors::{AggregateOutcome, Aggregator, AlertChecker, FileTracker};
use crate::readers::RawDataReader;
use crate::settings::Settings;
use crate::utils::progress::ProgressReporter;
use crate::writers::RawDataWriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Waiting for the next tick
    Idle,
    /// A poll cycle is in progress
    Running,
}

/// What one poll cycle did.
#[derive(Debug)]
pub struct CycleReport {
    pub snapshot: PathBuf,
    pub readings: usize,
    pub files_aggregated: usize,
    pub summary_days: Option<usize>,
    pub alerts: Vec<AlertEvent>,
}

/// Drives fetch -> persist -> aggregate -> alert, one cycle per interval.
pub struct Scheduler<S: WeatherSource> {
    source: S,
    cities: Vec<String>,
    interval: Duration,
    writer: RawDataWriter,
    reader: RawDataReader,
    tracker: FileTracker,
    aggregator: Aggregator,
    alert_checker: AlertChecker,
    state: SchedulerState,
    quiet: bool,
}

impl<S: WeatherSource> Scheduler<S> {
    pub fn new(source: S, settings: &Settings) -> Self {
        Self {
            source,
            cities: settings.cities.clone(),
            interval: settings.interval(),
            writer: RawDataWriter::new(&settings.data_dir),
            reader: RawDataReader::new(),
            tracker: FileTracker::new(),
            aggregator: Aggregator::new(settings.summary_path()),
            alert_checker: AlertChecker::new(settings.temp_threshold),
            state: SchedulerState::Idle,
            quiet: false,
        }
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn tracker(&self) -> &FileTracker {
        &self.tracker
    }

    /// Run one cycle. Any failure aborts the cycle and is returned as-is.
    pub async fn run_cycle(&mut self) -> Result<CycleReport> {
        self.state = SchedulerState::Running;
        let result = self.execute_cycle().await;
        self.state = SchedulerState::Idle;
        result
    }

    async fn execute_cycle(&mut self) -> Result<CycleReport> {
        let progress = ProgressReporter::new(
            self.cities.len() as u64,
            "Fetching current weather",
            self.quiet,
        );

        // Sequential, in configured order; the first failure ends the cycle
        let mut readings = Vec::with_capacity(self.cities.len());
        for city in &self.cities {
            progress.set_message(&format!("Fetching {}", city));
            readings.push(self.source.fetch(city).await?);
            progress.increment(1);
        }
        progress.finish_with_message(&format!("Fetched {} cities", readings.len()));

        let snapshot = self.writer.persist(&readings)?;

        let candidates = self.reader.list_files(self.writer.data_dir())?;
        let unseen = self.tracker.unseen(&candidates);

        let report = match self.aggregator.aggregate(&unseen)? {
            AggregateOutcome::NoNewFiles => CycleReport {
                snapshot,
                readings: readings.len(),
                files_aggregated: 0,
                summary_days: None,
                alerts: Vec::new(),
            },
            AggregateOutcome::Updated {
                summaries,
                new_readings,
                files,
            } => {
                let alerts: Vec<AlertEvent> = self.alert_checker.check(&new_readings).collect();
                self.tracker.mark_processed(&files);
                CycleReport {
                    snapshot,
                    readings: readings.len(),
                    files_aggregated: files.len(),
                    summary_days: Some(summaries.len()),
                    alerts,
                }
            }
        };

        info!(
            snapshot = %report.snapshot.display(),
            files = report.files_aggregated,
            alerts = report.alerts.len(),
            "Poll cycle complete"
        );
        Ok(report)
    }

    /// Cycle, sleep, repeat until `shutdown` resolves or a cycle fails.
    ///
    /// Shutdown is observed while sleeping; a cycle in progress always
    /// finishes first.
    pub async fn run<F>(&mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        info!(
            cities = self.cities.len(),
            interval_secs = self.interval.as_secs(),
            "Starting weather collection"
        );

        loop {
            if let Err(e) = self.run_cycle().await {
                error!(error = %e, "Poll cycle failed, stopping scheduler");
                return Err(e);
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping scheduler");
                    return Ok(());
                }
            }
        }
    }
}
