//! Read/write-splitting data access layer for PostgreSQL.
//!
//! All database traffic flows through a [`DbContext`](context::DbContext)
//! holding two independently sized pools: a primary for read/write traffic
//! and a replica for read-only traffic. On top of raw execution the context
//! layers statement validation, a replica-to-primary fallback for reads
//! that come back empty (replication lag), named-timer instrumentation, and
//! a streaming path that delivers large results row by row without
//! buffering.
//!
//! ```rust,no_run
//! use pg_relay::prelude::*;
//!
//! # async fn demo() -> Result<(), RelayDbError> {
//! let mut primary = deadpool_postgres::Config::new();
//! primary.host = Some("db-primary".into());
//! primary.port = Some(5432);
//! primary.dbname = Some("app".into());
//! primary.user = Some("app".into());
//! primary.password = Some("secret".into());
//! let mut replica = primary.clone();
//! replica.host = Some("db-replica".into());
//!
//! let ctx = DbContext::new_postgres(&RelaySettings::new(primary, replica, false))?;
//! let rows = ctx
//!     .execute_read_only_with_fallback(
//!         "SELECT id, name FROM player WHERE id = $1",
//!         &[DbValue::Int(1)],
//!     )
//!     .await?;
//! # let _ = rows;
//! # Ok(()) }
//! ```

pub mod config;
pub mod context;
pub mod error;
mod executor;
pub mod metrics;
pub mod pool;
pub mod postgres;
pub mod prelude;
pub mod row;
pub mod types;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use config::RelaySettings;
pub use context::DbContext;
pub use error::RelayDbError;
pub use row::{DbRow, FromRow};
pub use types::DbValue;
