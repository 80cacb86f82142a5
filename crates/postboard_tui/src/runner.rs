//! TUI runner - terminal setup and main loop.

use crate::{App, Event, EventHandler};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use postboard_error::{TuiError, TuiErrorKind, TuiResult};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::io::{self, Write};
use tracing::{debug, instrument, warn};

/// Run the TUI until the user quits.
///
/// The terminal is restored even when the loop fails.
#[instrument(skip(app), fields(units = app.units.len(), mode = ?app.mode))]
pub fn run_tui(mut app: App, tick_rate_ms: u64) -> TuiResult<()> {
    enable_raw_mode().map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalSetup(format!(
            "Failed to enable raw mode: {}",
            e
        )))
    })?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        return Err(abort_setup(
            &mut stdout,
            false,
            format!("Failed to enter alternate screen: {}", e),
        ));
    }

    let mut terminal = match Terminal::new(CrosstermBackend::new(io::stdout())) {
        Ok(terminal) => terminal,
        Err(e) => {
            return Err(abort_setup(
                &mut stdout,
                true,
                format!("Failed to create terminal: {}", e),
            ));
        }
    };

    let events = EventHandler::new(tick_rate_ms);
    let result = run_loop(&mut terminal, &mut app, || events.next());

    disable_raw_mode().map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalRestore(format!(
            "Failed to disable raw mode: {}",
            e
        )))
    })?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalRestore(format!(
            "Failed to leave alternate screen: {}",
            e
        )))
    })?;
    terminal.show_cursor().map_err(|e| {
        TuiError::new(TuiErrorKind::TerminalRestore(format!(
            "Failed to show cursor: {}",
            e
        )))
    })?;

    result
}

/// Undoes a partial terminal setup and reports why it failed.
///
/// Restore failures are logged; the setup failure is the error returned.
#[track_caller]
fn abort_setup<W: Write>(out: &mut W, entered_alternate_screen: bool, reason: String) -> TuiError {
    if entered_alternate_screen {
        if let Err(e) = execute!(out, LeaveAlternateScreen) {
            warn!(error = %e, "Failed to leave alternate screen after setup failure");
        }
    }
    if let Err(e) = disable_raw_mode() {
        warn!(error = %e, "Failed to disable raw mode after setup failure");
    }
    TuiError::new(TuiErrorKind::TerminalSetup(reason))
}

/// Draws and applies events until the app asks to quit.
///
/// Generic over the backend and the event source so it can be driven
/// without a real terminal.
pub fn run_loop<B, F>(terminal: &mut Terminal<B>, app: &mut App, mut next_event: F) -> TuiResult<()>
where
    B: Backend,
    F: FnMut() -> TuiResult<Option<Event>>,
{
    while !app.should_quit {
        terminal
            .draw(|f| crate::ui::draw(f, app))
            .map_err(|e| TuiError::new(TuiErrorKind::Rendering(format!("Failed to draw: {}", e))))?;

        match next_event()? {
            Some(Event::Key(key)) => {
                debug!(code = ?key.code, "Key pressed");
                app.handle_key(key);
            }
            Some(Event::Tick) | None => {}
        }
    }
    Ok(())
}
