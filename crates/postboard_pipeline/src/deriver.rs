//! Row to post conversion and derived metrics.

use chrono::{DateTime, NaiveDateTime, Utc};
use postboard_core::{DropReport, MediaType, Post, Row, TabularResult};
use postboard_error::{RowError, RowErrorKind};
use serde_json::Value as JsonValue;
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// Posts that survived derivation, in fetch order, plus the rows that did not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enriched {
    /// Valid posts, in the order the store returned them
    pub posts: Vec<Post>,
    /// Accounting of dropped rows
    pub report: DropReport,
}

/// Turns raw rows into [`Post`]s with their derived `like_rate`.
///
/// A row whose id or counts cannot be read is dropped and recorded in
/// the [`DropReport`]; the rest of the batch is unaffected.
///
/// # Examples
///
/// ```
/// use postboard_core::{Column, ColumnType, LikeRate, TabularResult};
/// use postboard_pipeline::MetricDeriver;
/// use serde_json::json;
///
/// let result = TabularResult::from_json_rows(
///     vec![Column::new("id", ColumnType::String)],
///     vec![
///         json!({"id": "a", "reach": 100, "like_count": 10, "comments_count": 0, "saved": 0}),
///         json!({"id": "b", "reach": 0, "like_count": 5, "comments_count": 0, "saved": 0}),
///     ],
/// )
/// .unwrap();
///
/// let enriched = MetricDeriver.derive(result);
/// assert_eq!(*enriched.posts[0].like_rate(), LikeRate::Defined(0.1));
/// assert_eq!(*enriched.posts[1].like_rate(), LikeRate::Undefined);
/// assert!(enriched.report.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricDeriver;

impl MetricDeriver {
    /// Derives posts from every row of `result`.
    #[instrument(skip_all, fields(rows = result.rows().len()))]
    pub fn derive(&self, result: TabularResult) -> Enriched {
        let mut enriched = Enriched::default();
        let mut seen = HashSet::new();

        for (row_index, row) in result.into_rows().into_iter().enumerate() {
            match self.derive_row(row_index, &row) {
                Ok(post) if !seen.insert(post.id().clone()) => {
                    let err = RowError::new(
                        row_index,
                        Some(post.id().clone()),
                        RowErrorKind::DuplicateId(post.id().clone()),
                    );
                    warn!(error = %err, "Dropping row");
                    enriched.report.record(&err);
                }
                Ok(post) => enriched.posts.push(post),
                Err(err) => {
                    warn!(error = %err, "Dropping row");
                    enriched.report.record(&err);
                }
            }
        }

        debug!(
            posts = enriched.posts.len(),
            dropped = enriched.report.dropped(),
            "Derived posts"
        );
        enriched
    }

    /// Converts a single row.
    ///
    /// # Errors
    ///
    /// Returns a [`RowError`] if the id is missing, or a count is missing,
    /// negative, fractional or not a number.
    pub fn derive_row(&self, row_index: usize, row: &Row) -> Result<Post, RowError> {
        let id = read_id(row)
            .ok_or_else(|| RowError::new(row_index, None, RowErrorKind::MissingField("id".into())))?;
        let count = |field: &str| {
            read_count(row, field).map_err(|kind| RowError::new(row_index, Some(id.clone()), kind))
        };

        let mut builder = Post::builder();
        builder
            .id(id.clone())
            .caption(read_text(row, "caption"))
            .media_type(MediaType::parse(&read_text(row, "media_type")))
            .source(read_text(row, "source"))
            .reach(count("reach")?)
            .like_count(count("like_count")?)
            .comments_count(count("comments_count")?)
            .saved(count("saved")?);
        if let Some(created) = row.get("created_time").and_then(read_timestamp) {
            builder.created_time(created);
        }

        builder.build().map_err(|e| {
            RowError::new(
                row_index,
                Some(id.clone()),
                RowErrorKind::MissingField(e.to_string()),
            )
        })
    }
}

fn read_id(row: &Row) -> Option<String> {
    match row.get("id")? {
        JsonValue::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn read_text(row: &Row, field: &str) -> String {
    match row.get(field) {
        None | Some(JsonValue::Null) => String::new(),
        Some(JsonValue::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Reads a non-negative integer count.
///
/// Accepts JSON integers, integral floats and numeric strings, since
/// stores disagree on how they encode 64-bit integers.
fn read_count(row: &Row, field: &str) -> Result<u64, RowErrorKind> {
    let not_numeric = |value: &JsonValue| RowErrorKind::NotNumeric {
        field: field.to_string(),
        value: value.to_string(),
    };

    match row.get(field) {
        None | Some(JsonValue::Null) => Err(RowErrorKind::MissingField(field.to_string())),
        Some(value @ JsonValue::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().and_then(integral))
            .ok_or_else(|| not_numeric(value)),
        Some(value @ JsonValue::String(s)) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
                .ok_or_else(|| not_numeric(value))
        }
        Some(value) => Err(not_numeric(value)),
    }
}

fn integral(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64)
        .then_some(value as u64)
}

/// Reads a timestamp given as epoch seconds, RFC 3339, or the store's
/// `YYYY-MM-DD HH:MM:SS[.f] UTC` text form.
fn read_timestamp(value: &JsonValue) -> Option<DateTime<Utc>> {
    match value {
        JsonValue::Number(n) => n.as_f64().and_then(from_epoch_seconds),
        JsonValue::String(s) => {
            let s = s.trim();
            if let Ok(secs) = s.parse::<f64>() {
                return from_epoch_seconds(secs);
            }
            if let Ok(parsed) = DateTime::parse_from_rfc3339(s) {
                return Some(parsed.with_timezone(&Utc));
            }
            let naive = s.trim_end_matches(" UTC");
            NaiveDateTime::parse_from_str(naive, "%Y-%m-%d %H:%M:%S%.f")
                .ok()
                .map(|dt| dt.and_utc())
        }
        _ => None,
    }
}

fn from_epoch_seconds(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}
