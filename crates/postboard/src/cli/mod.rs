//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the postboard binary.

mod board;
mod commands;
mod run;
mod show;

pub use board::board;
pub use commands::{Cli, Commands};
pub use show::show;
