//! The read-only post query, with builder pattern.

use derive_builder::Builder;
use derive_getters::Getters;
use postboard_error::SourceError;
use serde::{Deserialize, Serialize};

/// A fixed, read-only query selecting post rows from one table.
///
/// The row cap is mandatory: a post query never reads an unbounded result.
///
/// # Examples
///
/// ```
/// use postboard_interface::PostQuery;
///
/// let query = PostQuery::builder()
///     .table("bizbuddydemo-v1.facebook_data.lundys_postdata")
///     .order_by("created_time")
///     .limit(10u64)
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     query.to_sql().unwrap(),
///     "SELECT * FROM `bizbuddydemo-v1.facebook_data.lundys_postdata` ORDER BY created_time DESC LIMIT 10"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
pub struct PostQuery {
    /// Fully qualified table or view (`project.dataset.table`).
    #[builder(setter(into))]
    table: String,

    /// Columns to select (None = SELECT *).
    #[builder(default, setter(into, strip_option))]
    columns: Option<Vec<String>>,

    /// ORDER BY column.
    #[builder(default, setter(into, strip_option))]
    order_by: Option<String>,

    /// Sort direction for `order_by`.
    #[builder(default = "true")]
    descending: bool,

    /// Hard row cap.
    limit: u64,
}

impl PostQuery {
    /// Creates a new builder for `PostQuery`.
    pub fn builder() -> PostQueryBuilder {
        PostQueryBuilder::default()
    }

    /// Identity used in logs and error messages.
    pub fn label(&self) -> &str {
        &self.table
    }

    /// Renders the query as standard SQL.
    ///
    /// # Errors
    ///
    /// Returns a `QueryRejected` error if the table or a column name
    /// contains characters outside the identifier set, or the row cap is
    /// zero.
    pub fn to_sql(&self) -> Result<String, SourceError> {
        if self.table.is_empty()
            || !self
                .table
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            return Err(SourceError::rejected(
                &self.table,
                "table name contains invalid characters",
            ));
        }

        let col_list = match &self.columns {
            Some(cols) if !cols.is_empty() => {
                for col in cols {
                    if !is_column_identifier(col) {
                        return Err(SourceError::rejected(
                            &self.table,
                            format!("column name '{}' contains invalid characters", col),
                        ));
                    }
                }
                cols.join(", ")
            }
            _ => "*".to_string(),
        };

        let mut sql = format!("SELECT {} FROM `{}`", col_list, self.table);

        if let Some(order) = &self.order_by {
            if !is_column_identifier(order) {
                return Err(SourceError::rejected(
                    &self.table,
                    format!("ORDER BY column '{}' contains invalid characters", order),
                ));
            }
            let direction = if self.descending { "DESC" } else { "ASC" };
            sql.push_str(&format!(" ORDER BY {} {}", order, direction));
        }

        if self.limit == 0 {
            return Err(SourceError::rejected(&self.table, "row cap must be at least 1"));
        }
        sql.push_str(&format!(" LIMIT {}", self.limit));

        Ok(sql)
    }
}

fn is_column_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
