//! In-memory query executor.

use async_trait::async_trait;
use postboard_core::{Row, TabularResult};
use postboard_error::SourceError;
use postboard_interface::{PostQuery, QueryExecutor};
use serde_json::Value as JsonValue;
use std::cmp::Ordering;
use std::path::Path;
use tracing::{debug, instrument};

/// Serves a fixed table, honouring the query's ordering and row cap.
///
/// Useful for tests and for replaying an exported result file.
///
/// # Examples
///
/// ```
/// # #[tokio::main]
/// # async fn main() {
/// use postboard_core::{Column, ColumnType, TabularResult};
/// use postboard_interface::{PostQuery, QueryExecutor};
/// use postboard_source::InMemoryExecutor;
/// use serde_json::json;
///
/// let table = TabularResult::from_json_rows(
///     vec![Column::new("id", ColumnType::String), Column::new("created_time", ColumnType::Timestamp)],
///     vec![json!({"id": "old", "created_time": 1.0}), json!({"id": "new", "created_time": 2.0})],
/// )
/// .unwrap();
/// let executor = InMemoryExecutor::new(table);
///
/// let query = PostQuery::builder().table("posts").order_by("created_time").limit(1u64).build().unwrap();
/// let result = executor.execute(&query).await.unwrap();
/// assert_eq!(result.rows()[0]["id"], json!("new"));
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryExecutor {
    table: TabularResult,
}

impl InMemoryExecutor {
    /// Creates an executor serving `table`.
    pub fn new(table: TabularResult) -> Self {
        Self { table }
    }

    /// Loads a table from a JSON file holding a serialized [`TabularResult`].
    ///
    /// # Errors
    ///
    /// Returns a `SourceUnavailable` error naming the file if it cannot be
    /// read or decoded.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let label = path.as_ref().display().to_string();
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SourceError::unavailable(&label, format!("cannot read fixture: {}", e)))?;
        let table: TabularResult = serde_json::from_str(&contents)
            .map_err(|e| SourceError::unavailable(&label, format!("cannot decode fixture: {}", e)))?;
        debug!(rows = table.rows().len(), "Loaded fixture table");
        Ok(Self::new(table))
    }
}

#[async_trait]
impl QueryExecutor for InMemoryExecutor {
    #[instrument(skip(self, query), fields(query = %query.label()))]
    async fn execute(&self, query: &PostQuery) -> Result<TabularResult, SourceError> {
        query.to_sql()?;

        let mut rows: Vec<Row> = self.table.rows().clone();
        if let Some(column) = query.order_by() {
            rows.sort_by(|a, b| {
                let ordering = compare_cells(a.get(column), b.get(column));
                if *query.descending() {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }
        rows.truncate(*query.limit() as usize);

        debug!(rows = rows.len(), "Served in-memory rows");
        Ok(TabularResult::new(self.table.columns().clone(), rows))
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}

/// Orders cells the way a SQL store would: NULL lowest, numbers
/// numerically, everything else by its text.
fn compare_cells(a: Option<&JsonValue>, b: Option<&JsonValue>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => cell_text(a).cmp(&cell_text(b)),
        },
    }
}

fn cell_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
