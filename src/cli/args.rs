use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "weather-monitor")]
#[command(about = "Collects current weather, keeps daily summaries and charts them")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        help = "Configuration file [default: weather.toml if present]"
    )]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Hide progress bars")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Poll the weather API on the configured interval until interrupted
    Collect {
        #[arg(long, help = "Run a single poll cycle and exit")]
        once: bool,
    },

    /// Rebuild the daily summary from every raw snapshot on disk
    Aggregate,

    /// Redraw the summary chart on the configured cadence
    Visualize {
        #[arg(long, help = "Render once and exit")]
        once: bool,

        #[arg(
            short,
            long,
            help = "Chart output path [default: {data_dir}/weather_chart.svg]"
        )]
        output: Option<PathBuf>,

        #[arg(short, long, default_value = "1", help = "Number of days to plot, ending today")]
        days: u32,
    },

    /// Print the daily summary table
    Summary {
        #[arg(
            short,
            long,
            default_value = "0",
            help = "Show only the most recent N days (0 = all)"
        )]
        limit: usize,
    },
}
