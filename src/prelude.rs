//! Convenient imports for common functionality.

pub use crate::config::RelaySettings;
pub use crate::context::DbContext;
pub use crate::error::RelayDbError;
pub use crate::metrics::{QueryMetrics, TracingMetrics};
pub use crate::pool::{QueryPool, RowStream};
pub use crate::postgres::PgPool;
pub use crate::row::{DbRow, FromRow};
pub use crate::types::DbValue;
