use clap::Parser;
use weather_monitor::cli::{run, Cli};
use weather_monitor::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
