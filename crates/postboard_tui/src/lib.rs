//! Terminal surface for postboard leaderboards.
//!
//! Shows ranked posts as a grid of cards with a detail view, or a failure
//! screen when the run failed. Built with ratatui for terminal rendering.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
mod events;
mod runner;
mod surface;
pub mod ui;

pub use app::{App, AppMode};
pub use events::{Event, EventHandler};
pub use runner::{run_loop, run_tui};
pub use surface::{DEFAULT_TICK_RATE_MS, TerminalSurface};
