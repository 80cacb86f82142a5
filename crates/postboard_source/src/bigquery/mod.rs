//! BigQuery REST executor.

mod client;
mod conversion;
mod dto;

pub use client::BigQueryExecutor;
pub use conversion::to_tabular;
pub use dto::{
    ErrorBody, ErrorEnvelope, FieldSchema, JobReference, QueryRequest, QueryRequestBuilder,
    QueryResponse, TableCell, TableRow, TableSchema,
};
