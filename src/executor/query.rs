use tracing::warn;

use crate::error::RelayDbError;
use crate::pool::QueryPool;
use crate::row::DbRow;
use crate::types::DbValue;

/// Guard against malformed call sites before any pool contact.
pub(crate) fn validate_statement(statement: &str) -> Result<(), RelayDbError> {
    if statement.trim().is_empty() {
        return Err(RelayDbError::InvalidStatement(
            "statement must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Execute one statement with the full release discipline: exactly one
/// acquire and exactly one release per invocation, on every path.
///
/// Acquisition failure is logged and surfaced without attempting the
/// statement. A statement failure releases the connection with the poison
/// signal so the pool discards it instead of recycling.
pub(crate) async fn raw_query<P: QueryPool>(
    pool: &P,
    statement: &str,
    params: &[DbValue],
) -> Result<Vec<DbRow>, RelayDbError> {
    let mut conn = match pool.acquire().await {
        Ok(conn) => conn,
        Err(e) => {
            warn!(error = %e, "connection acquisition failed");
            return Err(e);
        }
    };

    match pool.query(&mut conn, statement, params).await {
        Ok(rows) => {
            pool.release(conn, None);
            Ok(rows)
        }
        Err(e) => {
            pool.release(conn, Some(&e));
            Err(e)
        }
    }
}

/// Validated entry point: rejects blank statements, then runs [`raw_query`].
/// Zero rows resolve to an empty vector, never an error.
pub(crate) async fn run_query<P: QueryPool>(
    pool: &P,
    statement: &str,
    params: &[DbValue],
) -> Result<Vec<DbRow>, RelayDbError> {
    validate_statement(statement)?;
    raw_query(pool, statement, params).await
}
