use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayDbError {
    #[error(transparent)]
    PostgresError(#[from] tokio_postgres::Error),

    #[error(transparent)]
    PoolError(#[from] deadpool::managed::PoolError<tokio_postgres::Error>),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Invalid statement: {0}")]
    InvalidStatement(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    #[error("Row decode error: {0}")]
    DecodeError(String),
}
