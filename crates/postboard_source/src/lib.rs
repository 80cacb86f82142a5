//! Query sources for the postboard pipeline.
//!
//! [`QuerySourceAdapter`] runs a [`PostQuery`](postboard_interface::PostQuery)
//! through any [`QueryExecutor`](postboard_interface::QueryExecutor) and
//! checks the result against the post schema. Two executors ship here:
//!
//! - [`BigQueryExecutor`] - the BigQuery REST API
//! - [`InMemoryExecutor`] - a fixed table, for tests and replaying exports

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod adapter;
pub mod bigquery;
mod in_memory;
mod schema;

pub use adapter::QuerySourceAdapter;
pub use bigquery::BigQueryExecutor;
pub use in_memory::InMemoryExecutor;
pub use schema::{POST_COLUMNS, required_columns, validate_schema};
