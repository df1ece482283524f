use std::error::Error;

use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};
use tokio_util::bytes;

use crate::types::DbValue;

/// Borrow a parameter slice as the driver's trait-object form.
#[must_use]
pub fn as_sql_refs(params: &[DbValue]) -> Vec<&(dyn ToSql + Sync)> {
    params.iter().map(|p| p as &(dyn ToSql + Sync)).collect()
}

impl ToSql for DbValue {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut bytes::BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            DbValue::Int(i) => (*i).to_sql(ty, out),
            DbValue::Float(f) => (*f).to_sql(ty, out),
            DbValue::Text(s) => s.to_sql(ty, out),
            DbValue::Bool(b) => (*b).to_sql(ty, out),
            DbValue::Timestamp(dt) => dt.to_sql(ty, out),
            DbValue::Json(json) => json.to_sql(ty, out),
            DbValue::Bytes(bytes) => bytes.to_sql(ty, out),
            DbValue::Null => Ok(IsNull::Yes),
        }
    }

    fn accepts(ty: &Type) -> bool {
        // Only the types the enum can represent
        matches!(
            *ty,
            Type::INT2
                | Type::INT4
                | Type::INT8
                | Type::FLOAT4
                | Type::FLOAT8
                | Type::TEXT
                | Type::VARCHAR
                | Type::CHAR
                | Type::NAME
                | Type::BOOL
                | Type::TIMESTAMP
                | Type::TIMESTAMPTZ
                | Type::DATE
                | Type::JSON
                | Type::JSONB
                | Type::BYTEA
        )
    }

    to_sql_checked!();
}
