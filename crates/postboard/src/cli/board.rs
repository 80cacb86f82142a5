//! `board` command handler.

use super::commands::RunArgs;
use postboard::PostboardResult;
use std::path::Path;

/// Shows the leaderboard in the terminal UI.
///
/// Returns whether the run failed so the caller can set the exit status.
#[cfg(feature = "tui")]
pub async fn board(config: Option<&Path>, args: &RunArgs) -> PostboardResult<bool> {
    use super::run::{build_board, load_config};
    use postboard::{PresentationSurface, TerminalSurface};

    let config = load_config(config, args)?;
    let board = build_board(&config, args).await?;
    let failed = board.is_failed();
    tracing::info!(failed, "Launching terminal leaderboard");
    TerminalSurface::default().present(board)?;
    Ok(failed)
}

#[cfg(not(feature = "tui"))]
pub async fn board(_config: Option<&Path>, _args: &RunArgs) -> PostboardResult<bool> {
    eprintln!("Error: TUI feature not enabled. Rebuild with --features tui, or use `postboard show`");
    std::process::exit(1);
}
