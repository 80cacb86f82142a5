//! Query source adapter.

use crate::schema::validate_schema;
use postboard_core::TabularResult;
use postboard_error::SourceError;
use postboard_interface::{PostQuery, QueryExecutor};
use tracing::{debug, error, instrument};

/// Fetches raw post rows through an injected execution capability.
///
/// The adapter owns the query; the executor is passed per call, so the
/// same adapter can run against the live store or an in-memory table.
///
/// # Examples
///
/// ```
/// use postboard_interface::PostQuery;
/// use postboard_source::QuerySourceAdapter;
///
/// let query = PostQuery::builder().table("demo.facebook_data.posts").limit(10u64).build().unwrap();
/// let adapter = QuerySourceAdapter::new(query);
/// assert_eq!(adapter.query().label(), "demo.facebook_data.posts");
/// ```
#[derive(Debug, Clone)]
pub struct QuerySourceAdapter {
    query: PostQuery,
}

impl QuerySourceAdapter {
    /// Creates an adapter for `query`.
    pub fn new(query: PostQuery) -> Self {
        Self { query }
    }

    /// The query this adapter runs.
    pub fn query(&self) -> &PostQuery {
        &self.query
    }

    /// Runs the query once and checks the result's schema.
    ///
    /// Rows come back in the order the store returned them.
    ///
    /// # Errors
    ///
    /// * `QueryRejected` - the query is malformed (nothing is sent) or the
    ///   store refused it
    /// * `Unavailable` - the store could not be reached or authenticated
    /// * `SchemaMismatch` - the result lacks required post columns
    #[instrument(skip(self, executor), fields(query = %self.query.label(), executor = executor.name()))]
    pub async fn fetch(&self, executor: &dyn QueryExecutor) -> Result<TabularResult, SourceError> {
        self.query.to_sql()?;

        let result = executor.execute(&self.query).await.inspect_err(|e| {
            error!(error = %e, "Query failed");
        })?;

        validate_schema(self.query.label(), &result).inspect_err(|e| {
            error!(error = %e, "Result schema rejected");
        })?;

        debug!(rows = result.rows().len(), "Fetched post rows");
        Ok(result)
    }
}
