//! Top-level error wrapper types.

use crate::{ConfigError, JsonError, OutputError, SourceError};
#[cfg(feature = "tui")]
use crate::TuiError;

/// Every failure a postboard run can surface.
///
/// # Examples
///
/// ```
/// use postboard_error::{PostboardError, SourceError};
///
/// let source_err = SourceError::unavailable("posts", "connection refused");
/// let err: PostboardError = source_err.into();
/// assert!(format!("{}", err).contains("Source unavailable"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum PostboardErrorKind {
    /// Remote store failure (fatal for the run)
    #[from(SourceError)]
    Source(SourceError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON encoding or decoding error
    #[from(JsonError)]
    Json(JsonError),
    /// Writing output failed
    #[from(OutputError)]
    Output(OutputError),
    /// Terminal surface error
    #[cfg(feature = "tui")]
    #[from(TuiError)]
    Tui(TuiError),
}

/// Postboard error with kind discrimination.
///
/// # Examples
///
/// ```
/// use postboard_error::{ConfigError, PostboardErrorKind, PostboardResult};
///
/// fn might_fail() -> PostboardResult<()> {
///     Err(ConfigError::invalid("ranking.top_n", "must be at least 1"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), PostboardErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Postboard Error: {}", _0)]
pub struct PostboardError(Box<PostboardErrorKind>);

impl PostboardError {
    /// Create a new error from a kind.
    pub fn new(kind: PostboardErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PostboardErrorKind {
        &self.0
    }
}

impl<T> From<T> for PostboardError
where
    T: Into<PostboardErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for postboard operations.
pub type PostboardResult<T> = std::result::Result<T, PostboardError>;
