//! The columns a post query must return.

use postboard_core::TabularResult;
use postboard_error::{SourceError, SourceErrorKind};

/// Columns every post query must return.
///
/// Only presence is checked; cell values are read leniently per row.
pub const POST_COLUMNS: &[&str] = &[
    "id",
    "created_time",
    "caption",
    "media_type",
    "source",
    "reach",
    "like_count",
    "comments_count",
    "saved",
];

/// Names of the required post columns, in declaration order.
pub fn required_columns() -> impl Iterator<Item = &'static str> {
    POST_COLUMNS.iter().copied()
}

/// Checks that every required column is declared by the result.
///
/// All missing columns are reported together.
///
/// # Examples
///
/// ```
/// use postboard_core::{Column, ColumnType, TabularResult};
/// use postboard_error::SourceErrorKind;
/// use postboard_source::validate_schema;
///
/// let result = TabularResult::new(vec![Column::new("id", ColumnType::String)], vec![]);
/// let err = validate_schema("posts", &result).unwrap_err();
/// match err.kind {
///     SourceErrorKind::SchemaMismatch { missing, .. } => assert!(missing.contains(&"reach".to_string())),
///     other => panic!("unexpected error: {other}"),
/// }
/// ```
pub fn validate_schema(query: &str, result: &TabularResult) -> Result<(), SourceError> {
    let missing: Vec<String> = required_columns()
        .filter(|name| !result.has_column(name))
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SourceError::new(SourceErrorKind::SchemaMismatch {
            query: query.to_string(),
            missing,
        }))
    }
}
