//! Per-run accounting of rows that could not become posts.

use postboard_error::RowError;
use serde::{Deserialize, Serialize};

/// Maximum number of dropped rows kept as samples.
pub const DROP_SAMPLE_LIMIT: usize = 5;

/// A dropped row, kept as a sample in a [`DropReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedRow {
    /// Position in the fetched result
    pub row_index: usize,
    /// Post id, when the row had one
    pub id: Option<String>,
    /// Why the row was dropped
    pub reason: String,
}

impl From<&RowError> for DroppedRow {
    fn from(err: &RowError) -> Self {
        Self {
            row_index: err.row_index,
            id: err.id.clone(),
            reason: err.kind.to_string(),
        }
    }
}

/// Dropped-row count and a handful of samples.
///
/// # Examples
///
/// ```
/// use postboard_core::DropReport;
/// use postboard_error::{RowError, RowErrorKind};
///
/// let mut report = DropReport::default();
/// assert!(report.is_empty());
///
/// report.record(&RowError::new(
///     1,
///     Some("p2".to_string()),
///     RowErrorKind::MissingField("comments_count".to_string()),
/// ));
/// assert_eq!(report.dropped(), 1);
/// assert_eq!(report.sample_ids(), vec!["p2"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropReport {
    dropped: usize,
    samples: Vec<DroppedRow>,
}

impl DropReport {
    /// Counts a dropped row, keeping it as a sample while there is room.
    pub fn record(&mut self, err: &RowError) {
        self.dropped += 1;
        if self.samples.len() < DROP_SAMPLE_LIMIT {
            self.samples.push(DroppedRow::from(err));
        }
    }

    /// Total rows dropped.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Whether no rows were dropped.
    pub fn is_empty(&self) -> bool {
        self.dropped == 0
    }

    /// Sampled dropped rows.
    pub fn samples(&self) -> &[DroppedRow] {
        &self.samples
    }

    /// Ids of the sampled rows that had one.
    pub fn sample_ids(&self) -> Vec<&str> {
        self.samples
            .iter()
            .filter_map(|s| s.id.as_deref())
            .collect()
    }

    /// One-line notice for display, or `None` when nothing was dropped.
    pub fn notice(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let noun = if self.dropped == 1 { "row" } else { "rows" };
        let ids = self.sample_ids();
        if ids.is_empty() {
            Some(format!("{} {} dropped", self.dropped, noun))
        } else {
            Some(format!(
                "{} {} dropped (sample ids: {})",
                self.dropped,
                noun,
                ids.join(", ")
            ))
        }
    }
}
