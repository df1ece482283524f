use std::sync::Arc;

use async_trait::async_trait;
use deadpool_postgres::{Config as PgConfig, Object, Pool as DeadpoolPool, PoolConfig, Runtime};
use futures_util::StreamExt;
use tokio_postgres::NoTls;
use tokio_postgres::types::ToSql;
use tracing::debug;

use crate::config::RelaySettings;
use crate::error::RelayDbError;
use crate::pool::{QueryPool, RowStream};
use crate::row::DbRow;
use crate::types::DbValue;

use super::params::as_sql_refs;
use super::row::{column_names, row_with_columns, rows_from_postgres};

/// Production pool: deadpool-postgres over tokio-postgres.
///
/// Release with an error signal detaches the object from the pool
/// (`Object::take`), so a connection that failed mid-statement is dropped
/// instead of recycled.
#[derive(Clone)]
pub struct PgPool {
    pool: DeadpoolPool,
}

impl std::fmt::Debug for PgPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgPool")
            .field("status", &self.pool.status())
            .finish()
    }
}

impl PgPool {
    /// Build one pool from an endpoint config, capped at `max_size`.
    ///
    /// # Errors
    /// Returns `RelayDbError::ConnectionError` if pool creation fails.
    pub fn from_config(mut cfg: PgConfig, max_size: usize) -> Result<Self, RelayDbError> {
        cfg.pool = Some(PoolConfig::new(max_size));
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| {
                RelayDbError::ConnectionError(format!("Failed to create Postgres pool: {e}"))
            })?;
        Ok(Self { pool })
    }

    /// Build the primary/replica pair, both sized by the settings policy.
    ///
    /// # Errors
    /// Returns `RelayDbError::ConfigError` for missing endpoint fields or
    /// `RelayDbError::ConnectionError` if pool creation fails.
    pub fn connect_pair(settings: &RelaySettings) -> Result<(Self, Self), RelayDbError> {
        settings.validate()?;
        let max_size = settings.max_pool_size();
        let primary = Self::from_config(settings.primary.clone(), max_size)?;
        let replica = Self::from_config(settings.replica.clone(), max_size)?;
        Ok((primary, replica))
    }
}

#[async_trait]
impl QueryPool for PgPool {
    type Conn = Object;

    async fn acquire(&self) -> Result<Object, RelayDbError> {
        self.pool.get().await.map_err(RelayDbError::PoolError)
    }

    fn release(&self, conn: Object, error: Option<&RelayDbError>) {
        if error.is_some() {
            debug!("discarding pooled connection after statement failure");
            drop(Object::take(conn));
        }
        // Dropping the object recycles it into the pool.
    }

    async fn query(
        &self,
        conn: &mut Object,
        statement: &str,
        params: &[DbValue],
    ) -> Result<Vec<DbRow>, RelayDbError> {
        let refs = as_sql_refs(params);
        let rows = conn.query(statement, &refs).await?;
        rows_from_postgres(&rows)
    }

    async fn query_stream(
        &self,
        conn: &mut Object,
        statement: &str,
        params: &[DbValue],
    ) -> Result<RowStream, RelayDbError> {
        let stream = conn
            .query_raw(statement, params.iter().map(|p| p as &dyn ToSql))
            .await?;

        // Column names are built from the first row and shared by the rest.
        let mut columns: Option<Arc<Vec<String>>> = None;
        let mapped = stream.map(move |item| match item {
            Ok(row) => {
                let cols = columns
                    .get_or_insert_with(|| column_names(&row))
                    .clone();
                row_with_columns(&row, cols)
            }
            Err(e) => Err(RelayDbError::PostgresError(e)),
        });
        Ok(mapped.boxed())
    }
}
