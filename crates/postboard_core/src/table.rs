//! Tabular query results.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Semantic type of a result column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Text
    #[display("string")]
    String,
    /// Whole number
    #[display("integer")]
    Integer,
    /// Floating point or decimal number
    #[display("float")]
    Float,
    /// Point in time
    #[display("timestamp")]
    Timestamp,
    /// True or false
    #[display("boolean")]
    Boolean,
    /// A store type with no dedicated variant
    #[display("{}", _0)]
    Other(String),
}

impl ColumnType {
    /// Maps a store type name (`INT64`, `STRING`, ...) to a column type.
    ///
    /// # Examples
    ///
    /// ```
    /// use postboard_core::ColumnType;
    ///
    /// assert_eq!(ColumnType::from_store_name("INT64"), ColumnType::Integer);
    /// assert_eq!(ColumnType::from_store_name("timestamp"), ColumnType::Timestamp);
    /// assert_eq!(
    ///     ColumnType::from_store_name("GEOGRAPHY"),
    ///     ColumnType::Other("GEOGRAPHY".to_string())
    /// );
    /// ```
    pub fn from_store_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "STRING" => ColumnType::String,
            "INTEGER" | "INT64" => ColumnType::Integer,
            "FLOAT" | "FLOAT64" | "NUMERIC" | "BIGNUMERIC" => ColumnType::Float,
            "TIMESTAMP" | "DATETIME" => ColumnType::Timestamp,
            "BOOLEAN" | "BOOL" => ColumnType::Boolean,
            _ => ColumnType::Other(name.to_string()),
        }
    }
}

/// A declared result column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct Column {
    /// Column name
    name: String,
    /// Semantic type
    #[serde(rename = "type")]
    column_type: ColumnType,
}

impl Column {
    /// Creates a column declaration.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// A single result row keyed by column name.
pub type Row = Map<String, JsonValue>;

/// Rows returned by a query together with their declared schema.
///
/// Rows keep the order the store returned them in.
///
/// # Examples
///
/// ```
/// use postboard_core::{Column, ColumnType, TabularResult};
/// use serde_json::json;
///
/// let result = TabularResult::from_json_rows(
///     vec![Column::new("id", ColumnType::String), Column::new("reach", ColumnType::Integer)],
///     vec![json!({"id": "a", "reach": 10}), json!({"id": "b", "reach": 0})],
/// )
/// .unwrap();
///
/// assert_eq!(result.rows().len(), 2);
/// assert!(result.has_column("reach"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
pub struct TabularResult {
    /// Declared schema
    columns: Vec<Column>,
    /// Row data in fetch order
    rows: Vec<Row>,
}

impl TabularResult {
    /// Creates a result from a schema and rows.
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Creates a result from JSON values, which must all be objects.
    ///
    /// Returns `None` if any value is not an object.
    pub fn from_json_rows(columns: Vec<Column>, rows: Vec<JsonValue>) -> Option<Self> {
        let rows = rows
            .into_iter()
            .map(|value| match value {
                JsonValue::Object(map) => Some(map),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self { columns, rows })
    }

    /// Whether the schema declares a column with this name.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Consumes the result, yielding its rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}
