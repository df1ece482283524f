use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::error::RelayDbError;
use crate::row::DbRow;
use crate::types::DbValue;

/// Incremental row delivery for one statement. The stream owns no pooled
/// state; the executor holds the connection for the stream's lifetime.
pub type RowStream = BoxStream<'static, Result<DbRow, RelayDbError>>;

/// The contract this layer needs from a pooling collaborator.
///
/// The executors own the acquire/release discipline; implementations own
/// connection lifecycle and disposal policy. [`release`](Self::release)
/// receives the statement error when one occurred so the pool can evict the
/// connection instead of recycling it (its session state is suspect after a
/// failure). The executors never infer disposal from error type.
#[async_trait]
pub trait QueryPool: Send + Sync {
    /// A leased connection, exclusively owned between acquire and release.
    type Conn: Send;

    /// Lease a connection; suspends while the pool is exhausted.
    ///
    /// # Errors
    /// Surfaces pool exhaustion and connect/auth failures. No connection is
    /// leased on failure.
    async fn acquire(&self) -> Result<Self::Conn, RelayDbError>;

    /// Return a leased connection. `error` is the poison signal: `Some`
    /// means the connection may be in an undefined session state and should
    /// be discarded rather than recycled.
    fn release(&self, conn: Self::Conn, error: Option<&RelayDbError>);

    /// Execute one parameterized statement, buffering all rows.
    ///
    /// # Errors
    /// Surfaces statement preparation and execution failures.
    async fn query(
        &self,
        conn: &mut Self::Conn,
        statement: &str,
        params: &[DbValue],
    ) -> Result<Vec<DbRow>, RelayDbError>;

    /// Execute one parameterized statement, yielding rows incrementally.
    ///
    /// # Errors
    /// Surfaces statement preparation failures; row-level failures arrive
    /// through the stream.
    async fn query_stream(
        &self,
        conn: &mut Self::Conn,
        statement: &str,
        params: &[DbValue],
    ) -> Result<RowStream, RelayDbError>;
}
