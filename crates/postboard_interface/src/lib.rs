//! Seams between the postboard pipeline and the outside world.
//!
//! This crate defines the execution capability the query source adapter
//! runs queries through ([`QueryExecutor`]), the query itself
//! ([`PostQuery`]), and the contract with display surfaces
//! ([`PresentationSurface`], [`Board`]).

mod executor;
mod query;
mod surface;

pub use executor::QueryExecutor;
pub use query::{PostQuery, PostQueryBuilder, PostQueryBuilderError};
pub use surface::{Board, FailureNotice, LayoutHints, Leaderboard, PresentationSurface, UnitStream};
