//! Postboard - engagement leaderboards for social-media posts
//!
//! Postboard reads post records from a remote analytical store, derives each
//! post's like rate, ranks the posts by an engagement metric and presents
//! the top of the ranking as a leaderboard.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use postboard::{BigQueryExecutor, Pipeline, PostboardConfig, TextSurface, OutputFormat};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PostboardConfig::load()?;
//!     let pipeline = Pipeline::from_config(&config)?;
//!     let executor = BigQueryExecutor::new(
//!         config.source.project_id.clone(),
//!         std::env::var("POSTBOARD_ACCESS_TOKEN")?,
//!     );
//!
//!     let mut surface = TextSurface::stdout(OutputFormat::Human);
//!     pipeline.present(&executor, &mut surface).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `tui` (default) - Terminal leaderboard surface
//!
//! # Architecture
//!
//! - `postboard_error` - Error types
//! - `postboard_core` - Posts, tabular results, presentation units
//! - `postboard_interface` - Executor and surface traits, the post query
//! - `postboard_source` - Query source adapter, BigQuery and in-memory executors
//! - `postboard_pipeline` - Derivation, ranking, rendering, configuration
//! - `postboard_tui` - Terminal surface
//!
//! This crate (`postboard`) re-exports everything for convenience.

pub use postboard_core::*;
pub use postboard_error::*;
pub use postboard_interface::*;
pub use postboard_pipeline::*;
pub use postboard_source::*;

#[cfg(feature = "tui")]
pub use postboard_tui::{App, AppMode, DEFAULT_TICK_RATE_MS, TerminalSurface};

pub mod observability;
mod text;

pub use text::{OutputFormat, TextSurface};
