//! The execution capability seam.

use crate::PostQuery;
use async_trait::async_trait;
use postboard_core::TabularResult;
use postboard_error::SourceError;

/// An authenticated, read-only handle on a remote structured store.
///
/// Obtaining the credentials behind an executor is the caller's business;
/// the pipeline only ever receives a ready-to-use value and passes it to
/// the query source adapter for each run.
///
/// Implementations map transport and authentication failures to
/// `SourceErrorKind::Unavailable` and refused queries (bad SQL, missing
/// table, insufficient permission) to `SourceErrorKind::QueryRejected`.
/// They never retry.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Runs the query and returns its rows with their declared schema.
    async fn execute(&self, query: &PostQuery) -> Result<TabularResult, SourceError>;

    /// Short name of the backing store (e.g. "bigquery").
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<T> QueryExecutor for std::sync::Arc<T>
where
    T: QueryExecutor + ?Sized,
{
    async fn execute(&self, query: &PostQuery) -> Result<TabularResult, SourceError> {
        (**self).execute(query).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
