use super::query::run_query;
use crate::error::RelayDbError;
use crate::pool::QueryPool;
use crate::row::DbRow;
use crate::types::DbValue;

/// Read from the replica; when it returns no rows, re-issue the identical
/// statement against the primary. Covers replication lag: a row written
/// moments ago may not be visible on the replica yet, but is authoritative
/// on the primary.
///
/// A replica *error* propagates unchanged. Only the empty result retries;
/// re-running after an unknown failure is not assumed safe or useful.
pub(crate) async fn read_with_fallback<P: QueryPool>(
    replica: &P,
    primary: &P,
    statement: &str,
    params: &[DbValue],
) -> Result<Vec<DbRow>, RelayDbError> {
    let rows = run_query(replica, statement, params).await?;
    if rows.is_empty() {
        return run_query(primary, statement, params).await;
    }
    Ok(rows)
}
