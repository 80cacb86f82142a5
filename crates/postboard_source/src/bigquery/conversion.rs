//! Conversions from BigQuery's wire encoding to tabular results.

use super::dto::{FieldSchema, TableRow, TableSchema};
use postboard_core::{Column, ColumnType, Row, TabularResult};
use serde_json::{Number, Value as JsonValue};
use tracing::{debug, instrument};

/// Converts a schema and its rows into a [`TabularResult`].
///
/// Cells are paired with fields by position. Integer, float, timestamp
/// and boolean cells are decoded from their string encoding; a cell that
/// fails to decode is kept as the original string so the row-level
/// validation downstream can report it.
#[instrument(skip_all, fields(fields = schema.fields.len(), rows = rows.len()))]
pub fn to_tabular(schema: &TableSchema, rows: Vec<TableRow>) -> TabularResult {
    let columns: Vec<Column> = schema
        .fields
        .iter()
        .map(|field| Column::new(&field.name, ColumnType::from_store_name(&field.field_type)))
        .collect();

    let rows: Vec<Row> = rows
        .into_iter()
        .map(|row| {
            schema
                .fields
                .iter()
                .zip(columns.iter())
                .zip(row.f)
                .map(|((field, column), cell)| {
                    (field.name.clone(), decode_cell(field, column.column_type(), cell.v))
                })
                .collect()
        })
        .collect();

    debug!(columns = columns.len(), "Converted BigQuery rows");
    TabularResult::new(columns, rows)
}

fn decode_cell(field: &FieldSchema, column_type: &ColumnType, value: JsonValue) -> JsonValue {
    if field.mode.as_deref() == Some("REPEATED") {
        // Arrays arrive as [{"v": ...}, ...]; unwrap the cells, decode the items.
        return match value {
            JsonValue::Array(items) => JsonValue::Array(
                items
                    .into_iter()
                    .map(|item| match item {
                        JsonValue::Object(mut cell) => cell
                            .remove("v")
                            .map(|v| decode_scalar(column_type, v))
                            .unwrap_or(JsonValue::Null),
                        other => other,
                    })
                    .collect(),
            ),
            other => other,
        };
    }
    decode_scalar(column_type, value)
}

fn decode_scalar(column_type: &ColumnType, value: JsonValue) -> JsonValue {
    let JsonValue::String(raw) = value else {
        return value;
    };

    match column_type {
        ColumnType::Integer => raw
            .parse::<i64>()
            .map(JsonValue::from)
            .unwrap_or(JsonValue::String(raw)),
        ColumnType::Float | ColumnType::Timestamp => raw
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::String(raw)),
        ColumnType::Boolean => match raw.as_str() {
            "true" => JsonValue::Bool(true),
            "false" => JsonValue::Bool(false),
            _ => JsonValue::String(raw),
        },
        ColumnType::String | ColumnType::Other(_) => JsonValue::String(raw),
    }
}
