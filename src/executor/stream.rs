use futures_util::StreamExt;
use tracing::warn;

use super::query::validate_statement;
use crate::error::RelayDbError;
use crate::pool::QueryPool;
use crate::row::DbRow;
use crate::types::DbValue;

/// Stream one statement's rows through push callbacks.
///
/// One connection is held for the stream's lifetime. Exactly one of
/// `on_end`/`on_error` fires, and the connection is released exactly once,
/// before that terminal callback. A mid-stream failure releases with the
/// poison signal.
pub(crate) async fn stream_query<P, FR, FD, FE>(
    pool: &P,
    statement: &str,
    params: &[DbValue],
    mut on_row: FR,
    on_end: FD,
    on_error: FE,
) where
    P: QueryPool,
    FR: FnMut(DbRow),
    FD: FnOnce(),
    FE: FnOnce(RelayDbError),
{
    if let Err(e) = validate_statement(statement) {
        on_error(e);
        return;
    }

    let mut conn = match pool.acquire().await {
        Ok(conn) => conn,
        Err(e) => {
            warn!(error = %e, "connection acquisition failed");
            on_error(e);
            return;
        }
    };

    let mut rows = match pool.query_stream(&mut conn, statement, params).await {
        Ok(rows) => rows,
        Err(e) => {
            pool.release(conn, Some(&e));
            on_error(e);
            return;
        }
    };

    loop {
        match rows.next().await {
            Some(Ok(row)) => on_row(row),
            Some(Err(e)) => {
                drop(rows);
                pool.release(conn, Some(&e));
                on_error(e);
                return;
            }
            None => break,
        }
    }

    drop(rows);
    pool.release(conn, None);
    on_end();
}
