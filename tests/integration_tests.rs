use async_trait::async_trait;
use clap::Parser;
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::time::Duration;
use tempfile::TempDir;
use weather_monitor::cli::{Cli, Commands};
use weather_monitor::fetchers::WeatherSource;
use weather_monitor::models::{AlertEvent, WeatherReading};
use weather_monitor::readers::SummaryReader;
use weather_monitor::scheduler::Scheduler;
use weather_monitor::settings::Settings;
use weather_monitor::visualizer::{SvgChartRenderer, TickOutcome, Visualizer};
use weather_monitor::{Result, WeatherError};

/// Returns fixed readings stamped with the current time.
struct FixedSource {
    readings: HashMap<String, (String, f64)>,
}

impl FixedSource {
    fn new(entries: &[(&str, &str, f64)]) -> Self {
        Self {
            readings: entries
                .iter()
                .map(|(city, condition, temp)| {
                    (city.to_string(), (condition.to_string(), *temp))
                })
                .collect(),
        }
    }
}

#[async_trait]
impl WeatherSource for FixedSource {
    async fn fetch(&self, city: &str) -> Result<WeatherReading> {
        let (condition, temp) = self
            .readings
            .get(city)
            .cloned()
            .ok_or_else(|| WeatherError::schema(city, "weather[0].main"))?;
        Ok(WeatherReading::new(
            city.to_string(),
            condition,
            temp,
            temp - 1.0,
            50,
            4.0,
            chrono::Utc::now().timestamp(),
        ))
    }
}

fn settings(dir: &TempDir, cities: &[&str], threshold: f64) -> Settings {
    let mut settings = Settings::new("test-key", cities.iter().map(|c| c.to_string()).collect());
    settings.data_dir = dir.path().to_path_buf();
    settings.temp_threshold = threshold;
    settings
}

/// Snapshot names have one-second resolution
async fn next_second() {
    tokio::time::sleep(Duration::from_millis(1100)).await;
}

#[tokio::test]
async fn test_lima_alert_scenario() -> Result<()> {
    let dir = TempDir::new()?;
    let source = FixedSource::new(&[("Lima", "Clear", 31.5)]);
    let mut scheduler = Scheduler::new(source, &settings(&dir, &["Lima"], 30.0)).with_quiet(true);

    let report = scheduler.run_cycle().await?;

    assert_eq!(
        report.alerts,
        vec![AlertEvent {
            city: "Lima".to_string(),
            temperature_c: 31.5,
            threshold: 30.0,
        }]
    );
    Ok(())
}

#[tokio::test]
async fn test_cycles_never_double_count() -> Result<()> {
    let dir = TempDir::new()?;
    let config = settings(&dir, &["Lima", "Oslo"], 40.0);
    let source = FixedSource::new(&[("Lima", "Clear", 20.0), ("Oslo", "Rain", 10.0)]);
    let mut scheduler = Scheduler::new(source, &config).with_quiet(true);

    let first = scheduler.run_cycle().await?;
    next_second().await;
    let second = scheduler.run_cycle().await?;

    assert_eq!(first.files_aggregated, 1);
    assert_eq!(second.files_aggregated, 1);
    assert_eq!(scheduler.tracker().len(), 2);
    assert!(second.alerts.is_empty());

    let summary = SummaryReader::new().read(&config.summary_path())?;
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].avg_temp, 15.0);
    assert_eq!(summary[0].max_temp, 20.0);
    assert_eq!(summary[0].min_temp, 10.0);
    // Clear and Rain tie twice each; Clear was seen first
    assert_eq!(summary[0].dominant_condition, "Clear");
    Ok(())
}

#[tokio::test]
async fn test_restart_rebuilds_summary_from_disk() -> Result<()> {
    let dir = TempDir::new()?;
    let config = settings(&dir, &["Lima"], 40.0);

    let mut before = Scheduler::new(FixedSource::new(&[("Lima", "Clear", 10.0)]), &config)
        .with_quiet(true);
    before.run_cycle().await?;
    drop(before);
    next_second().await;

    // Fresh process: empty tracker, but the earlier snapshot is still on disk
    let mut after = Scheduler::new(FixedSource::new(&[("Lima", "Clouds", 30.0)]), &config)
        .with_quiet(true);
    let report = after.run_cycle().await?;

    assert_eq!(report.files_aggregated, 2);
    let summary = SummaryReader::new().read(&config.summary_path())?;
    assert_eq!(summary[0].avg_temp, 20.0);
    assert_eq!(summary[0].min_temp, 10.0);
    assert_eq!(summary[0].max_temp, 30.0);
    Ok(())
}

#[tokio::test]
async fn test_collect_then_visualize() -> Result<()> {
    let dir = TempDir::new()?;
    let config = settings(&dir, &["Lima", "Cairo"], 45.0);
    let source = FixedSource::new(&[("Lima", "Clear", 22.0), ("Cairo", "Clear", 38.0)]);
    let mut scheduler = Scheduler::new(source, &config).with_quiet(true);
    scheduler.run_cycle().await?;

    let chart = config.chart_path();
    let mut visualizer = Visualizer::new(
        config.summary_path(),
        SvgChartRenderer::new(&chart),
        config.visualize_interval(),
    );

    assert_eq!(visualizer.refresh(), TickOutcome::Rendered(1));
    let svg = std::fs::read_to_string(&chart)?;
    assert!(svg.contains("Humidity Overview"));
    assert!(svg.contains("+0.00"));
    Ok(())
}

#[test]
fn test_visualizer_without_summary_skips() {
    let dir = TempDir::new().unwrap();
    let config = settings(&dir, &["Lima"], 30.0);
    let mut visualizer = Visualizer::new(
        config.summary_path(),
        SvgChartRenderer::new(config.chart_path()),
        config.visualize_interval(),
    );

    assert_eq!(visualizer.refresh(), TickOutcome::Skipped);
    assert!(!config.chart_path().exists());
}

#[test]
fn test_cli_parsing() {
    let cli = Cli::try_parse_from([
        "weather-monitor",
        "--config",
        "weather.toml",
        "visualize",
        "--once",
        "--days",
        "3",
    ])
    .unwrap();

    assert!(cli.config.is_some());
    match cli.command {
        Commands::Visualize { once, days, output } => {
            assert!(once);
            assert_eq!(days, 3);
            assert!(output.is_none());
        }
        _ => panic!("expected visualize"),
    }

    let cli = Cli::try_parse_from(["weather-monitor", "collect", "-q"]).unwrap();
    assert!(cli.quiet);
    assert!(matches!(cli.command, Commands::Collect { once: false }));
}
