//! Postboard CLI binary.
//!
//! This binary provides command-line access to postboard:
//! - Show the leaderboard in a terminal UI
//! - Print the leaderboard as text or JSON

use clap::Parser;
use postboard::observability::{ObservabilityConfig, init_observability_with_config};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, board, show};

    // .env may carry POSTBOARD_ACCESS_TOKEN
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    init_observability_with_config(
        ObservabilityConfig::new("postboard")
            .with_log_level(log_level)
            .with_json_logs(cli.json_logs),
    )?;

    let config = cli.config.as_deref();
    let failed = match &cli.command {
        Commands::Board(args) => board(config, args).await?,
        Commands::Show { run, format } => show(config, run, *format).await?,
    };

    if failed {
        std::process::exit(1);
    }
    Ok(())
}
