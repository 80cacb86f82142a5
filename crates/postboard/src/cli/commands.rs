//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use postboard::{OutputFormat, RankKey};
use std::path::PathBuf;

/// Postboard - engagement leaderboard for social-media posts
#[derive(Parser, Debug)]
#[command(name = "postboard")]
#[command(about = "Engagement leaderboard for social-media posts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults: ./postboard.toml, ~/.config/postboard/postboard.toml)
    #[arg(long, global = true, env = "POSTBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the leaderboard in the terminal UI
    Board(RunArgs),

    /// Print the leaderboard
    Show {
        #[command(flatten)]
        run: RunArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,
    },
}

/// Options shared by every command that runs the pipeline.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Read rows from a JSON tabular result instead of BigQuery
    #[arg(long)]
    pub fixture: Option<PathBuf>,

    /// Number of posts on the board
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Ranking metric (reach, like_count, comments_count, saved, like_rate)
    #[arg(long)]
    pub rank_by: Option<RankKey>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_with_overrides() {
        let cli = Cli::try_parse_from([
            "postboard",
            "-v",
            "show",
            "--format",
            "json",
            "--fixture",
            "posts.json",
            "--top-n",
            "3",
            "--rank-by",
            "like_rate",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Show { run, format } => {
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(run.fixture, Some(PathBuf::from("posts.json")));
                assert_eq!(run.top_n, Some(3));
                assert_eq!(run.rank_by, Some(RankKey::LikeRate));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn board_takes_global_config() {
        let cli = Cli::try_parse_from(["postboard", "board", "--config", "custom.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Commands::Board(_)));
    }

    #[test]
    fn rejects_unknown_rank_key() {
        assert!(Cli::try_parse_from(["postboard", "show", "--rank-by", "shares"]).is_err());
    }
}
