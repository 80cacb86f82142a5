//! Terminal presentation surface.

use crate::{App, run_tui};
use postboard_error::PostboardResult;
use postboard_interface::{Board, PresentationSurface};
use tracing::{info, instrument};

/// Default event poll interval in milliseconds.
pub const DEFAULT_TICK_RATE_MS: u64 = 250;

/// Shows boards in an interactive full-screen terminal UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSurface {
    tick_rate_ms: u64,
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE_MS)
    }
}

impl TerminalSurface {
    /// Creates a surface polling for input every `tick_rate_ms`.
    pub fn new(tick_rate_ms: u64) -> Self {
        Self { tick_rate_ms }
    }
}

impl PresentationSurface for TerminalSurface {
    #[instrument(skip(self, board), fields(failed = board.is_failed()))]
    fn present(&mut self, board: Board) -> PostboardResult<()> {
        let app = App::from_board(board);
        info!(units = app.units.len(), "Opening terminal leaderboard");
        run_tui(app, self.tick_rate_ms)?;
        Ok(())
    }
}
