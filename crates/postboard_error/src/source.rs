//! Query source error types.

/// Fatal conditions raised while fetching posts from the remote store.
///
/// Every variant carries the identity of the query that failed so the
/// caller can tell which table was being read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SourceErrorKind {
    /// Transport or authentication failure
    #[display("Source unavailable for query '{}': {}", query, reason)]
    Unavailable {
        /// Query identity (target table)
        query: String,
        /// Underlying cause
        reason: String,
    },
    /// The store refused the query (malformed SQL, missing table, permissions)
    #[display("Query '{}' rejected: {}", query, reason)]
    QueryRejected {
        /// Query identity (target table)
        query: String,
        /// Underlying cause
        reason: String,
    },
    /// The result lacks columns the post schema requires
    #[display("Schema mismatch for query '{}': missing required columns [{}]", query, missing.join(", "))]
    SchemaMismatch {
        /// Query identity (target table)
        query: String,
        /// Required columns absent from the result
        missing: Vec<String>,
    },
}

impl SourceErrorKind {
    /// Identity of the query that failed.
    pub fn query(&self) -> &str {
        match self {
            SourceErrorKind::Unavailable { query, .. }
            | SourceErrorKind::QueryRejected { query, .. }
            | SourceErrorKind::SchemaMismatch { query, .. } => query,
        }
    }
}

/// Source error with location tracking.
///
/// # Examples
///
/// ```
/// use postboard_error::{SourceError, SourceErrorKind};
///
/// let err = SourceError::new(SourceErrorKind::QueryRejected {
///     query: "posts".to_string(),
///     reason: "Access Denied".to_string(),
/// });
/// assert!(format!("{}", err).contains("rejected"));
/// assert_eq!(err.kind.query(), "posts");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Source Error: {} at line {} in {}", kind, line, file)]
pub struct SourceError {
    /// The kind of error that occurred
    pub kind: SourceErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SourceError {
    /// Create a new source error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SourceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for an [`SourceErrorKind::Unavailable`] error.
    #[track_caller]
    pub fn unavailable(query: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::Unavailable {
            query: query.into(),
            reason: reason.into(),
        })
    }

    /// Shorthand for an [`SourceErrorKind::QueryRejected`] error.
    #[track_caller]
    pub fn rejected(query: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(SourceErrorKind::QueryRejected {
            query: query.into(),
            reason: reason.into(),
        })
    }
}
