use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

/// A value bound as a query parameter or read back from a result column.
///
/// One enum serves both directions so call sites never touch driver types:
/// ```rust
/// use pg_relay::prelude::*;
///
/// let params = vec![
///     DbValue::Int(42),
///     DbValue::Text("alice".into()),
///     DbValue::Null,
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DbValue {
    /// 64-bit integer
    Int(i64),
    /// 64-bit float
    Float(f64),
    /// Text value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Timestamp without timezone
    Timestamp(NaiveDateTime),
    /// JSON document
    Json(JsonValue),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// SQL NULL
    Null,
}

impl DbValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        if let DbValue::Int(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let DbValue::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let DbValue::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// Booleans stored as 0/1 integers decode as well.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DbValue::Bool(value) => Some(*value),
            DbValue::Int(0) => Some(false),
            DbValue::Int(1) => Some(true),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let DbValue::Timestamp(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&JsonValue> {
        if let DbValue::Json(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        if let DbValue::Bytes(value) = self {
            Some(value)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_zero_and_one_decode_as_bool() {
        assert_eq!(DbValue::Int(1).as_bool(), Some(true));
        assert_eq!(DbValue::Int(0).as_bool(), Some(false));
        assert_eq!(DbValue::Int(2).as_bool(), None);
    }

    #[test]
    fn null_is_null() {
        assert!(DbValue::Null.is_null());
        assert!(!DbValue::Int(0).is_null());
    }
}
