//! Instrumented test doubles for the pooling and metrics collaborators.
//!
//! Enabled through the `test-utils` feature; the crate's own integration
//! tests consume this module via a dev-dependency on the crate itself with
//! the feature switched on.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use futures_util::stream;

use crate::error::RelayDbError;
use crate::metrics::QueryMetrics;
use crate::pool::{QueryPool, RowStream};
use crate::row::DbRow;
use crate::types::DbValue;

/// Build a row without a driver in the loop.
#[must_use]
pub fn make_row(columns: &[&str], values: Vec<DbValue>) -> DbRow {
    let columns: Vec<String> = columns.iter().map(|c| (*c).to_string()).collect();
    DbRow::new(Arc::new(columns), values)
}

/// What the fake pool did, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolEvent {
    Acquired,
    AcquireFailed,
    Released { discarded: bool },
}

/// Scripted outcome for the next operation on a [`FakePool`].
pub enum FakeOutcome {
    /// Next acquire fails with this message.
    AcquireError(String),
    /// Next query succeeds with these rows.
    Rows(Vec<DbRow>),
    /// Next query fails with this message.
    QueryError(String),
    /// Next streaming query yields these rows, then optionally fails.
    Stream {
        rows: Vec<DbRow>,
        trailing_error: Option<String>,
    },
}

/// Zero-sized lease marker handed out by the fake pool.
pub struct FakeConn;

/// Scripted [`QueryPool`] double that records every acquire/release and
/// every executed statement, so tests can assert the release discipline.
#[derive(Clone, Default)]
pub struct FakePool {
    inner: Arc<FakeState>,
}

#[derive(Default)]
struct FakeState {
    script: Mutex<VecDeque<FakeOutcome>>,
    events: Mutex<Vec<PoolEvent>>,
    statements: Mutex<Vec<String>>,
}

impl FakePool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, outcome: FakeOutcome) {
        self.inner.script.lock().unwrap().push_back(outcome);
    }

    pub fn push_rows(&self, rows: Vec<DbRow>) {
        self.push(FakeOutcome::Rows(rows));
    }

    pub fn push_query_error(&self, message: &str) {
        self.push(FakeOutcome::QueryError(message.to_string()));
    }

    pub fn push_acquire_error(&self, message: &str) {
        self.push(FakeOutcome::AcquireError(message.to_string()));
    }

    pub fn push_stream(&self, rows: Vec<DbRow>, trailing_error: Option<&str>) {
        self.push(FakeOutcome::Stream {
            rows,
            trailing_error: trailing_error.map(str::to_string),
        });
    }

    /// Everything the pool was asked to do, in order.
    #[must_use]
    pub fn events(&self) -> Vec<PoolEvent> {
        self.inner.events.lock().unwrap().clone()
    }

    /// Statements that reached execution, in order.
    #[must_use]
    pub fn statements(&self) -> Vec<String> {
        self.inner.statements.lock().unwrap().clone()
    }

    #[must_use]
    pub fn acquire_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, PoolEvent::Acquired))
            .count()
    }

    #[must_use]
    pub fn release_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, PoolEvent::Released { .. }))
            .count()
    }

    fn record(&self, event: PoolEvent) {
        self.inner.events.lock().unwrap().push(event);
    }

    fn pop(&self) -> FakeOutcome {
        self.inner
            .script
            .lock()
            .unwrap()
            .pop_front()
            .expect("fake pool script exhausted")
    }
}

#[async_trait]
impl QueryPool for FakePool {
    type Conn = FakeConn;

    async fn acquire(&self) -> Result<FakeConn, RelayDbError> {
        let failure = {
            let mut script = self.inner.script.lock().unwrap();
            if matches!(script.front(), Some(FakeOutcome::AcquireError(_))) {
                match script.pop_front() {
                    Some(FakeOutcome::AcquireError(msg)) => Some(msg),
                    _ => None,
                }
            } else {
                None
            }
        };

        if let Some(msg) = failure {
            self.record(PoolEvent::AcquireFailed);
            return Err(RelayDbError::ConnectionError(msg));
        }
        self.record(PoolEvent::Acquired);
        Ok(FakeConn)
    }

    fn release(&self, _conn: FakeConn, error: Option<&RelayDbError>) {
        self.record(PoolEvent::Released {
            discarded: error.is_some(),
        });
    }

    async fn query(
        &self,
        _conn: &mut FakeConn,
        statement: &str,
        _params: &[DbValue],
    ) -> Result<Vec<DbRow>, RelayDbError> {
        self.inner
            .statements
            .lock()
            .unwrap()
            .push(statement.to_string());
        match self.pop() {
            FakeOutcome::Rows(rows) => Ok(rows),
            FakeOutcome::QueryError(msg) => Err(RelayDbError::ExecutionError(msg)),
            _ => panic!("fake pool script expected a buffered-query outcome"),
        }
    }

    async fn query_stream(
        &self,
        _conn: &mut FakeConn,
        statement: &str,
        _params: &[DbValue],
    ) -> Result<RowStream, RelayDbError> {
        self.inner
            .statements
            .lock()
            .unwrap()
            .push(statement.to_string());
        match self.pop() {
            FakeOutcome::Stream {
                rows,
                trailing_error,
            } => {
                let mut items: Vec<Result<DbRow, RelayDbError>> =
                    rows.into_iter().map(Ok).collect();
                if let Some(msg) = trailing_error {
                    items.push(Err(RelayDbError::ExecutionError(msg)));
                }
                Ok(stream::iter(items).boxed())
            }
            FakeOutcome::QueryError(msg) => Err(RelayDbError::ExecutionError(msg)),
            _ => panic!("fake pool script expected a streaming outcome"),
        }
    }
}

/// [`QueryMetrics`] double capturing each observation.
#[derive(Default)]
pub struct RecordingMetrics {
    observations: Mutex<Vec<(String, bool)>>,
}

impl RecordingMetrics {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Observed (name, success) pairs, in order.
    #[must_use]
    pub fn observations(&self) -> Vec<(String, bool)> {
        self.observations.lock().unwrap().clone()
    }
}

impl QueryMetrics for RecordingMetrics {
    fn observe_query(&self, name: &str, _elapsed: Duration, success: bool) {
        self.observations
            .lock()
            .unwrap()
            .push((name.to_string(), success));
    }
}
