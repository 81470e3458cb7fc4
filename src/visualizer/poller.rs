use chrono::{NaiveDate, Utc};
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::error::{Result, WeatherError};
use crate::readers::SummaryReader;
use crate::visualizer::{build_points, rows_in_window, ChartRenderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Rendered(usize),
    Skipped,
}

/// Periodically reloads the summary and redraws the chart.
pub struct Visualizer<R: ChartRenderer> {
    summary_path: PathBuf,
    renderer: R,
    interval: Duration,
    window_days: u32,
    reader: SummaryReader,
}

impl<R: ChartRenderer> Visualizer<R> {
    pub fn new(summary_path: impl Into<PathBuf>, renderer: R, interval: Duration) -> Self {
        Self {
            summary_path: summary_path.into(),
            renderer,
            interval,
            window_days: 1,
            reader: SummaryReader::new(),
        }
    }

    /// Plot the last `days` days instead of only today
    pub fn with_window_days(mut self, days: u32) -> Self {
        self.window_days = days.max(1);
        self
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Load, filter, diff and render for `today`. Errors with `DataEmpty`
    /// when no summary rows fall inside the window.
    pub fn render_for(&mut self, today: NaiveDate) -> Result<usize> {
        let rows = self.reader.read(&self.summary_path)?;
        let rows = rows_in_window(rows, today, self.window_days);
        if rows.is_empty() {
            return Err(WeatherError::DataEmpty(format!("No summary rows for {}", today)));
        }

        let points = build_points(&rows);
        self.renderer.render(&points)?;
        Ok(points.len())
    }

    /// One redraw. Never fails: problems are logged and the redraw skipped.
    pub fn refresh(&mut self) -> TickOutcome {
        let today = Utc::now().date_naive();
        match self.render_for(today) {
            Ok(count) => {
                info!(rows = count, date = %today, "Chart refreshed");
                TickOutcome::Rendered(count)
            }
            Err(e) if e.is_data_empty() => {
                warn!(date = %today, "No data for today: {}", e);
                TickOutcome::Skipped
            }
            Err(e) => {
                warn!(error = %e, "Chart refresh failed, will retry next tick");
                TickOutcome::Skipped
            }
        }
    }

    /// Refresh immediately, then once per interval, until `shutdown` resolves.
    pub async fn run<F>(&mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            summary = %self.summary_path.display(),
            interval_secs = self.interval.as_secs(),
            "Starting chart refresh loop"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.refresh();
                }
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping chart refresh loop");
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DailySummary;
    use crate::visualizer::ChartPoint;
    use crate::writers::SummaryWriter;
    use chrono::Duration as ChronoDuration;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<Vec<ChartPoint>>,
    }

    impl ChartRenderer for RecordingRenderer {
        fn render(&mut self, points: &[ChartPoint]) -> Result<()> {
            self.frames.push(points.to_vec());
            Ok(())
        }
    }

    fn summary(date: NaiveDate, avg_temp: f64) -> DailySummary {
        DailySummary {
            date,
            avg_temp,
            max_temp: avg_temp + 2.0,
            min_temp: avg_temp - 2.0,
            avg_humidity: 60.0,
            max_humidity: 70,
            min_humidity: 50,
            avg_wind_speed: 4.0,
            max_wind_speed: 6.0,
            min_wind_speed: 2.0,
            dominant_condition: "Clouds".to_string(),
        }
    }

    fn visualizer(dir: &TempDir) -> Visualizer<RecordingRenderer> {
        Visualizer::new(
            dir.path().join("daily_summary.csv"),
            RecordingRenderer::default(),
            Duration::from_secs(300),
        )
    }

    #[test]
    fn test_renders_todays_row_only() -> Result<()> {
        let dir = TempDir::new()?;
        let today = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        SummaryWriter::new().write(
            &[summary(today - ChronoDuration::days(1), 18.0), summary(today, 21.0)],
            &dir.path().join("daily_summary.csv"),
        )?;

        let mut viz = visualizer(&dir);
        assert_eq!(viz.render_for(today)?, 1);

        let frame = &viz.renderer().frames[0];
        assert_eq!(frame[0].date, today);
        assert_eq!(frame[0].temp_diff, 0.0);
        Ok(())
    }

    #[test]
    fn test_window_produces_deltas() -> Result<()> {
        let dir = TempDir::new()?;
        let today = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        SummaryWriter::new().write(
            &[
                summary(today - ChronoDuration::days(2), 10.0),
                summary(today - ChronoDuration::days(1), 12.0),
                summary(today, 9.0),
            ],
            &dir.path().join("daily_summary.csv"),
        )?;

        let mut viz = visualizer(&dir).with_window_days(3);
        viz.render_for(today)?;

        let diffs: Vec<f64> = viz.renderer().frames[0].iter().map(|p| p.temp_diff).collect();
        assert_eq!(diffs, vec![0.0, 2.0, -3.0]);
        Ok(())
    }

    #[test]
    fn test_no_rows_for_today_skips_redraw() -> Result<()> {
        let dir = TempDir::new()?;
        let today = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        SummaryWriter::new().write(
            &[summary(today - ChronoDuration::days(5), 10.0)],
            &dir.path().join("daily_summary.csv"),
        )?;

        let mut viz = visualizer(&dir);
        assert!(viz.render_for(today).unwrap_err().is_data_empty());
        assert!(viz.renderer().frames.is_empty());
        Ok(())
    }

    #[test]
    fn test_refresh_recovers_from_missing_summary() {
        let dir = TempDir::new().unwrap();
        let mut viz = visualizer(&dir);

        assert_eq!(viz.refresh(), TickOutcome::Skipped);
        assert_eq!(viz.refresh(), TickOutcome::Skipped);
    }

    #[test]
    fn test_refresh_recovers_from_corrupt_summary() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("daily_summary.csv"), "date,avg_temp\nnot-a-date,x\n").unwrap();

        let mut viz = visualizer(&dir);
        assert_eq!(viz.refresh(), TickOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_run_refreshes_then_stops() -> Result<()> {
        let dir = TempDir::new()?;
        let today = Utc::now().date_naive();
        SummaryWriter::new().write(&[summary(today, 20.0)], &dir.path().join("daily_summary.csv"))?;

        let mut viz = visualizer(&dir);
        let shutdown = tokio::time::sleep(std::time::Duration::from_millis(200));
        viz.run(shutdown).await?;

        assert_eq!(viz.renderer().frames.len(), 1);
        Ok(())
    }
}
