//! Error types for the postboard pipeline.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - constructors use `#[track_caller]` for automatic location capture
//!
//! Source errors (`Unavailable`, `QueryRejected`, `SchemaMismatch`) abort a
//! run. Row errors are recoverable and end up in a drop report instead.
//!
//! # Examples
//!
//! ```
//! use postboard_error::{PostboardResult, SourceError};
//!
//! fn fetch_posts() -> PostboardResult<Vec<String>> {
//!     Err(SourceError::unavailable("facebook_data.posts", "connection refused"))?
//! }
//!
//! match fetch_posts() {
//!     Ok(posts) => println!("Got {} posts", posts.len()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod json;
mod output;
mod row;
mod source;
#[cfg(feature = "tui")]
mod tui;

pub use config::{ConfigError, ConfigErrorKind};
pub use error::{PostboardError, PostboardErrorKind, PostboardResult};
pub use json::JsonError;
pub use output::OutputError;
pub use row::{RowError, RowErrorKind};
pub use source::{SourceError, SourceErrorKind};
#[cfg(feature = "tui")]
pub use tui::{TuiError, TuiErrorKind, TuiResult};
