//! Row-level error types.

/// Reasons a single fetched row cannot become a post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RowErrorKind {
    /// A required field is absent or null
    #[display("missing field '{}'", _0)]
    MissingField(String),
    /// A required numeric field holds something other than a non-negative integer
    #[display("field '{}' is not a non-negative integer: {}", field, value)]
    NotNumeric {
        /// Column name
        field: String,
        /// Offending value as received
        value: String,
    },
    /// The row repeats an id already seen in this fetch
    #[display("duplicate id '{}'", _0)]
    DuplicateId(String),
}

/// A malformed row, recoverable by dropping it.
///
/// # Examples
///
/// ```
/// use postboard_error::{RowError, RowErrorKind};
///
/// let err = RowError::new(
///     3,
///     Some("post_7".to_string()),
///     RowErrorKind::MissingField("comments_count".to_string()),
/// );
/// assert!(format!("{}", err).contains("comments_count"));
/// assert!(format!("{}", err).contains("post_7"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Malformed row {} (id {}): {}", row_index, id.as_deref().unwrap_or("unknown"), kind)]
pub struct RowError {
    /// Position of the row in the fetched result
    pub row_index: usize,
    /// Post id, when the row had a readable one
    pub id: Option<String>,
    /// What was wrong with the row
    pub kind: RowErrorKind,
}

impl RowError {
    /// Create a new row error.
    pub fn new(row_index: usize, id: Option<String>, kind: RowErrorKind) -> Self {
        Self { row_index, id, kind }
    }
}
