use std::time::Instant;

use super::query::{raw_query, validate_statement};
use crate::error::RelayDbError;
use crate::metrics::QueryMetrics;
use crate::pool::QueryPool;
use crate::row::DbRow;
use crate::types::DbValue;

/// Execute under a named instrumentation span.
///
/// A blank name or statement is a programmer error and fails before any
/// pool contact. The observation fires on both outcomes.
pub(crate) async fn metered_query<P: QueryPool>(
    pool: &P,
    metrics: &dyn QueryMetrics,
    name: &str,
    statement: &str,
    params: &[DbValue],
) -> Result<Vec<DbRow>, RelayDbError> {
    if name.trim().is_empty() {
        return Err(RelayDbError::InvalidStatement(
            "metered query requires a name".to_string(),
        ));
    }
    validate_statement(statement)?;

    let started = Instant::now();
    let result = raw_query(pool, statement, params).await;
    metrics.observe_query(name, started.elapsed(), result.is_ok());
    result
}
