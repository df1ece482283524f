use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value as JsonValue;
use tokio_postgres::Row;

use crate::error::RelayDbError;
use crate::row::DbRow;
use crate::types::DbValue;

/// Extract one column as a [`DbValue`], keyed on the server-side type name.
///
/// # Errors
/// Returns the driver error when the column cannot be read as the mapped
/// Rust type.
pub fn extract_value(row: &Row, idx: usize) -> Result<DbValue, RelayDbError> {
    let value = match row.columns()[idx].type_().name() {
        "int2" => row
            .try_get::<_, Option<i16>>(idx)?
            .map_or(DbValue::Null, |v| DbValue::Int(i64::from(v))),
        "int4" => row
            .try_get::<_, Option<i32>>(idx)?
            .map_or(DbValue::Null, |v| DbValue::Int(i64::from(v))),
        "int8" => row
            .try_get::<_, Option<i64>>(idx)?
            .map_or(DbValue::Null, DbValue::Int),
        "float4" => row
            .try_get::<_, Option<f32>>(idx)?
            .map_or(DbValue::Null, |v| DbValue::Float(f64::from(v))),
        "float8" => row
            .try_get::<_, Option<f64>>(idx)?
            .map_or(DbValue::Null, DbValue::Float),
        "bool" => row
            .try_get::<_, Option<bool>>(idx)?
            .map_or(DbValue::Null, DbValue::Bool),
        "timestamp" => row
            .try_get::<_, Option<NaiveDateTime>>(idx)?
            .map_or(DbValue::Null, DbValue::Timestamp),
        "timestamptz" => row
            .try_get::<_, Option<DateTime<Utc>>>(idx)?
            .map_or(DbValue::Null, |v| DbValue::Timestamp(v.naive_utc())),
        "json" | "jsonb" => row
            .try_get::<_, Option<JsonValue>>(idx)?
            .map_or(DbValue::Null, DbValue::Json),
        "bytea" => row
            .try_get::<_, Option<Vec<u8>>>(idx)?
            .map_or(DbValue::Null, DbValue::Bytes),
        // text, varchar, char, name; anything else is attempted as text
        _ => row
            .try_get::<_, Option<String>>(idx)?
            .map_or(DbValue::Null, DbValue::Text),
    };
    Ok(value)
}

/// Convert one driver row, reusing an already-built column-name set.
///
/// # Errors
/// Returns errors from column extraction.
pub fn row_with_columns(row: &Row, columns: Arc<Vec<String>>) -> Result<DbRow, RelayDbError> {
    let mut values = Vec::with_capacity(columns.len());
    for idx in 0..columns.len() {
        values.push(extract_value(row, idx)?);
    }
    Ok(DbRow::new(columns, values))
}

/// Convert a buffered result, sharing one column-name set across all rows.
///
/// # Errors
/// Returns errors from column extraction.
pub fn rows_from_postgres(rows: &[Row]) -> Result<Vec<DbRow>, RelayDbError> {
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };
    let columns: Arc<Vec<String>> = Arc::new(
        first
            .columns()
            .iter()
            .map(|col| col.name().to_string())
            .collect(),
    );

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        out.push(row_with_columns(row, Arc::clone(&columns))?);
    }
    Ok(out)
}

/// Column names of a driver row, for streaming where no buffered set exists.
#[must_use]
pub fn column_names(row: &Row) -> Arc<Vec<String>> {
    Arc::new(
        row.columns()
            .iter()
            .map(|col| col.name().to_string())
            .collect(),
    )
}
