//! BigQuery REST API data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Body of a `jobs.query` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Builder, Getters)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct QueryRequest {
    /// SQL text
    query: String,
    /// Always false: queries are standard SQL
    #[builder(default = "false")]
    use_legacy_sql: bool,
    /// Page size
    max_results: u64,
    /// How long the server may wait for the job before answering
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout_ms: Option<u64>,
    /// Dataset location (e.g. "US")
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
}

impl QueryRequest {
    /// Creates a new builder for `QueryRequest`.
    pub fn builder() -> QueryRequestBuilder {
        QueryRequestBuilder::default()
    }
}

/// Response of `jobs.query` and `jobs.getQueryResults`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    /// Result schema, present once the job completed
    #[serde(default)]
    pub schema: Option<TableSchema>,
    /// Job handle for follow-up calls
    #[serde(default)]
    pub job_reference: Option<JobReference>,
    /// Rows of this page
    #[serde(default)]
    pub rows: Option<Vec<TableRow>>,
    /// Token for the next page, if any
    #[serde(default)]
    pub page_token: Option<String>,
    /// Whether the rows are final
    #[serde(default)]
    pub job_complete: bool,
}

/// Result schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TableSchema {
    /// Column descriptions
    #[serde(default)]
    pub fields: Vec<FieldSchema>,
}

/// One column description.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldSchema {
    /// Column name
    pub name: String,
    /// Store type name (`STRING`, `INTEGER`, ...)
    #[serde(rename = "type")]
    pub field_type: String,
    /// `NULLABLE`, `REQUIRED` or `REPEATED`
    #[serde(default)]
    pub mode: Option<String>,
}

/// Job identity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobReference {
    /// Owning project
    pub project_id: String,
    /// Job id
    pub job_id: String,
    /// Job location
    #[serde(default)]
    pub location: Option<String>,
}

/// A row: one cell per schema field, in schema order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TableRow {
    /// Cells
    #[serde(default)]
    pub f: Vec<TableCell>,
}

/// A cell. Scalars arrive string-encoded; SQL NULL is JSON null.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TableCell {
    /// Raw value
    #[serde(default)]
    pub v: JsonValue,
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorEnvelope {
    /// Error details
    pub error: ErrorBody,
}

/// Error details.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    /// HTTP status code
    #[serde(default)]
    pub code: u16,
    /// Human-readable message
    #[serde(default)]
    pub message: String,
    /// Canonical status (e.g. `PERMISSION_DENIED`)
    #[serde(default)]
    pub status: Option<String>,
}
