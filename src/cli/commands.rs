use std::path::PathBuf;
use tracing::warn;

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::fetchers::OpenWeatherClient;
use crate::processors::{AggregateOutcome, Aggregator};
use crate::readers::{RawDataReader, SummaryReader};
use crate::scheduler::Scheduler;
use crate::settings::Settings;
use crate::utils::logging::init_logging;
use crate::utils::progress::ProgressReporter;
use crate::visualizer::{SvgChartRenderer, TickOutcome, Visualizer};

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Collect { once } => collect(&settings, once, cli.quiet).await,
        Commands::Aggregate => aggregate(&settings, cli.quiet),
        Commands::Visualize { once, output, days } => {
            visualize(&settings, once, output, days).await
        }
        Commands::Summary { limit } => summary(&settings, limit),
    }
}

async fn collect(settings: &Settings, once: bool, quiet: bool) -> Result<()> {
    settings.require_api()?;

    let client = OpenWeatherClient::from_settings(settings)?;
    let mut scheduler = Scheduler::new(client, settings).with_quiet(quiet);

    if !once {
        return scheduler.run(shutdown_signal()).await;
    }

    let report = scheduler.run_cycle().await?;
    println!("Stored {} readings in {}", report.readings, report.snapshot.display());
    match report.summary_days {
        Some(days) => println!(
            "Aggregated {} file(s) into {} day(s) of summary",
            report.files_aggregated, days
        ),
        None => println!("No new files to process."),
    }
    for alert in &report.alerts {
        println!("Alert! {}", alert);
    }
    Ok(())
}

fn aggregate(settings: &Settings, quiet: bool) -> Result<()> {
    let progress = ProgressReporter::new_spinner("Rebuilding daily summary...", quiet);

    let files = RawDataReader::new().list_files(&settings.data_dir)?;
    let mut aggregator = Aggregator::new(settings.summary_path());
    let outcome = aggregator.aggregate(&files)?;

    match outcome {
        AggregateOutcome::NoNewFiles => {
            progress.finish_with_message("No raw snapshots found");
        }
        AggregateOutcome::Updated {
            summaries,
            new_readings,
            files,
        } => {
            progress.finish_with_message(&format!(
                "Folded {} readings from {} file(s)",
                new_readings.len(),
                files.len()
            ));
            println!("\nDaily summary ({}):", aggregator.summary_path().display());
            for row in &summaries {
                println!("  {}", row.summary_line());
            }
        }
    }
    Ok(())
}

async fn visualize(
    settings: &Settings,
    once: bool,
    output: Option<PathBuf>,
    days: u32,
) -> Result<()> {
    let output = output.unwrap_or_else(|| settings.chart_path());
    let renderer = SvgChartRenderer::new(&output);
    let mut visualizer = Visualizer::new(
        settings.summary_path(),
        renderer,
        settings.visualize_interval(),
    )
    .with_window_days(days);

    if !once {
        return visualizer.run(shutdown_signal()).await;
    }

    match visualizer.refresh() {
        TickOutcome::Rendered(rows) => {
            println!("Chart with {} row(s) written to {}", rows, output.display())
        }
        TickOutcome::Skipped => println!("No data for today."),
    }
    Ok(())
}

fn summary(settings: &Settings, limit: usize) -> Result<()> {
    let path = settings.summary_path();
    let rows = match SummaryReader::new().read(&path) {
        Ok(rows) => rows,
        Err(e) if e.is_data_empty() => {
            println!("No daily summary yet at {}", path.display());
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let skip = if limit == 0 {
        0
    } else {
        rows.len().saturating_sub(limit)
    };

    println!("Daily summary ({} day(s)):", rows.len());
    for row in rows.iter().skip(skip) {
        println!("  {}", row.summary_line());
    }
    Ok(())
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
