use std::sync::Arc;

use crate::error::RelayDbError;
use crate::types::DbValue;

/// One row of a query result: an ordered mapping from column name to value.
///
/// Column names are shared across all rows of a result set via `Arc`, so a
/// large buffered result carries each name once.
#[derive(Debug, Clone)]
pub struct DbRow {
    columns: Arc<Vec<String>>,
    values: Vec<DbValue>,
}

impl DbRow {
    #[must_use]
    pub fn new(columns: Arc<Vec<String>>, values: Vec<DbValue>) -> Self {
        Self { columns, values }
    }

    /// Column names in result order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Look up a value by column name.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&DbValue> {
        self.columns
            .iter()
            .position(|name| name == column)
            .and_then(|idx| self.values.get(idx))
    }

    /// Look up a value by position.
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&DbValue> {
        self.values.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Like [`get`](Self::get), but a missing column is a `DecodeError`.
    ///
    /// # Errors
    /// Returns `RelayDbError::DecodeError` naming the column when absent.
    pub fn require(&self, column: &str) -> Result<&DbValue, RelayDbError> {
        self.get(column)
            .ok_or_else(|| RelayDbError::DecodeError(format!("missing column '{column}'")))
    }
}

/// A caller-supplied row shape.
///
/// Implement this to consume results as typed values instead of name lookups:
/// ```rust
/// use pg_relay::prelude::*;
///
/// struct Player {
///     id: i64,
///     name: String,
/// }
///
/// impl FromRow for Player {
///     fn from_row(row: &DbRow) -> Result<Self, RelayDbError> {
///         Ok(Player {
///             id: row.require("id")?.as_int().ok_or_else(|| {
///                 RelayDbError::DecodeError("id is not an integer".into())
///             })?,
///             name: row
///                 .require("name")?
///                 .as_text()
///                 .ok_or_else(|| RelayDbError::DecodeError("name is not text".into()))?
///                 .to_string(),
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// Decode one row into the implementing type.
    ///
    /// # Errors
    /// Returns `RelayDbError::DecodeError` when the row does not match the
    /// expected shape.
    fn from_row(row: &DbRow) -> Result<Self, RelayDbError>;
}

/// Decode a whole result set through a [`FromRow`] implementation.
///
/// # Errors
/// Fails on the first row that does not decode.
pub fn decode_rows<T: FromRow>(rows: &[DbRow]) -> Result<Vec<T>, RelayDbError> {
    rows.iter().map(T::from_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> DbRow {
        DbRow::new(
            Arc::new(vec!["id".to_string(), "name".to_string()]),
            vec![DbValue::Int(7), DbValue::Text("carol".to_string())],
        )
    }

    #[test]
    fn get_by_name_and_index_agree() {
        let row = sample_row();
        assert_eq!(row.get("id"), row.get_by_index(0));
        assert_eq!(row.get("name"), row.get_by_index(1));
        assert!(row.get("missing").is_none());
    }

    #[test]
    fn require_names_the_missing_column() {
        let row = sample_row();
        let err = row.require("absent").unwrap_err();
        assert!(matches!(err, RelayDbError::DecodeError(msg) if msg.contains("absent")));
    }
}
