use std::sync::Arc;

use crate::config::RelaySettings;
use crate::error::RelayDbError;
use crate::executor::{fallback, metered, query, stream};
use crate::metrics::{QueryMetrics, TracingMetrics};
use crate::pool::QueryPool;
use crate::postgres::PgPool;
use crate::row::{DbRow, FromRow, decode_rows};
use crate::types::DbValue;

/// The database context: both pools plus the instrumentation sink, passed
/// explicitly to whoever executes queries. There is no process-global pool
/// state; tests inject doubles through [`DbContext::with_pools`].
///
/// Writes (and anything that must see its own writes) go through
/// [`execute`](Self::execute) against the primary; reads go through the
/// `read_only` variants against the replica.
#[derive(Clone)]
pub struct DbContext<P: QueryPool> {
    primary: P,
    replica: P,
    metrics: Arc<dyn QueryMetrics>,
}

impl DbContext<PgPool> {
    /// Build the production context from endpoint settings.
    ///
    /// # Errors
    /// Returns `RelayDbError::ConfigError` for missing endpoint fields or
    /// `RelayDbError::ConnectionError` if pool creation fails.
    pub fn new_postgres(settings: &RelaySettings) -> Result<Self, RelayDbError> {
        let (primary, replica) = PgPool::connect_pair(settings)?;
        Ok(Self::with_pools(primary, replica))
    }
}

impl<P: QueryPool> DbContext<P> {
    /// Assemble a context from already-built pools.
    pub fn with_pools(primary: P, replica: P) -> Self {
        Self {
            primary,
            replica,
            metrics: Arc::new(TracingMetrics),
        }
    }

    /// Swap the instrumentation sink.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn QueryMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Execute one read/write statement against the primary pool.
    ///
    /// Zero rows resolve to an empty vector.
    ///
    /// # Errors
    /// Rejects blank statements before any pool contact; surfaces
    /// acquisition and statement failures.
    pub async fn execute(
        &self,
        statement: &str,
        params: &[DbValue],
    ) -> Result<Vec<DbRow>, RelayDbError> {
        query::run_query(&self.primary, statement, params).await
    }

    /// Execute one read-only statement against the replica pool.
    ///
    /// # Errors
    /// Rejects blank statements before any pool contact; surfaces
    /// acquisition and statement failures.
    pub async fn execute_read_only(
        &self,
        statement: &str,
        params: &[DbValue],
    ) -> Result<Vec<DbRow>, RelayDbError> {
        query::run_query(&self.replica, statement, params).await
    }

    /// Read from the replica, falling back to the primary when the replica
    /// returns no rows (replication lag). Errors never trigger the
    /// fallback.
    ///
    /// # Errors
    /// Surfaces replica errors unchanged; otherwise errors from the primary
    /// re-read.
    pub async fn execute_read_only_with_fallback(
        &self,
        statement: &str,
        params: &[DbValue],
    ) -> Result<Vec<DbRow>, RelayDbError> {
        fallback::read_with_fallback(&self.replica, &self.primary, statement, params).await
    }

    /// Execute against the primary under a named instrumentation span.
    ///
    /// # Errors
    /// Rejects a blank `name` or statement before any pool contact;
    /// surfaces acquisition and statement failures.
    pub async fn execute_metered(
        &self,
        name: &str,
        statement: &str,
        params: &[DbValue],
    ) -> Result<Vec<DbRow>, RelayDbError> {
        metered::metered_query(&self.primary, self.metrics.as_ref(), name, statement, params).await
    }

    /// Execute against the replica under a named instrumentation span.
    ///
    /// # Errors
    /// Rejects a blank `name` or statement before any pool contact;
    /// surfaces acquisition and statement failures.
    pub async fn execute_metered_read_only(
        &self,
        name: &str,
        statement: &str,
        params: &[DbValue],
    ) -> Result<Vec<DbRow>, RelayDbError> {
        metered::metered_query(&self.replica, self.metrics.as_ref(), name, statement, params).await
    }

    /// [`execute`](Self::execute) decoded through a caller-supplied row
    /// shape.
    ///
    /// # Errors
    /// As [`execute`](Self::execute), plus `DecodeError` on shape mismatch.
    pub async fn execute_as<T: FromRow>(
        &self,
        statement: &str,
        params: &[DbValue],
    ) -> Result<Vec<T>, RelayDbError> {
        let rows = self.execute(statement, params).await?;
        decode_rows(&rows)
    }

    /// [`execute_read_only`](Self::execute_read_only) decoded through a
    /// caller-supplied row shape.
    ///
    /// # Errors
    /// As [`execute_read_only`](Self::execute_read_only), plus
    /// `DecodeError` on shape mismatch.
    pub async fn execute_read_only_as<T: FromRow>(
        &self,
        statement: &str,
        params: &[DbValue],
    ) -> Result<Vec<T>, RelayDbError> {
        let rows = self.execute_read_only(statement, params).await?;
        decode_rows(&rows)
    }

    /// Explicit-callback adapter over the primary-pool path.
    pub async fn execute_with<F>(&self, statement: &str, params: &[DbValue], callback: F)
    where
        F: FnOnce(Result<Vec<DbRow>, RelayDbError>),
    {
        callback(query::raw_query(&self.primary, statement, params).await);
    }

    /// Explicit-callback adapter over the replica-pool path.
    pub async fn execute_read_only_with<F>(&self, statement: &str, params: &[DbValue], callback: F)
    where
        F: FnOnce(Result<Vec<DbRow>, RelayDbError>),
    {
        callback(query::raw_query(&self.replica, statement, params).await);
    }

    /// Stream a large read-only result from the replica, row by row.
    ///
    /// `on_row` fires once per row; then exactly one of `on_end`/`on_error`
    /// fires, after the connection has been released. Consumption is
    /// push-based; do not block indefinitely inside `on_row`.
    pub async fn stream_read_only<FR, FD, FE>(
        &self,
        statement: &str,
        params: &[DbValue],
        on_row: FR,
        on_end: FD,
        on_error: FE,
    ) where
        FR: FnMut(DbRow),
        FD: FnOnce(),
        FE: FnOnce(RelayDbError),
    {
        stream::stream_query(&self.replica, statement, params, on_row, on_end, on_error).await;
    }
}
