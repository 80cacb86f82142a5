//! `show` command handler.

use super::commands::RunArgs;
use super::run::{build_board, load_config};
use postboard::{OutputFormat, PostboardResult, PresentationSurface, TextSurface};
use std::path::Path;

/// Prints the leaderboard to stdout.
///
/// Returns whether the run failed so the caller can set the exit status.
pub async fn show(config: Option<&Path>, args: &RunArgs, format: OutputFormat) -> PostboardResult<bool> {
    let config = load_config(config, args)?;
    let board = build_board(&config, args).await?;
    let failed = board.is_failed();
    TextSurface::stdout(format).present(board)?;
    Ok(failed)
}
