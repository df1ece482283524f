use pg_relay::prelude::*;
use pg_relay::test_utils::{FakePool, PoolEvent, make_row};

fn ctx(primary: &FakePool, replica: &FakePool) -> DbContext<FakePool> {
    DbContext::with_pools(primary.clone(), replica.clone())
}

#[tokio::test]
async fn success_acquires_and_releases_exactly_once() {
    let primary = FakePool::new();
    let replica = FakePool::new();
    primary.push_rows(vec![make_row(&["id"], vec![DbValue::Int(1)])]);

    let rows = ctx(&primary, &replica)
        .execute("SELECT id FROM player WHERE id = $1", &[DbValue::Int(1)])
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("id"), Some(&DbValue::Int(1)));
    assert_eq!(
        primary.events(),
        vec![PoolEvent::Acquired, PoolEvent::Released { discarded: false }]
    );
    assert!(replica.events().is_empty());
}

#[tokio::test]
async fn statement_failure_discards_the_connection() {
    let primary = FakePool::new();
    let replica = FakePool::new();
    primary.push_query_error("duplicate key value violates unique constraint");

    let err = ctx(&primary, &replica)
        .execute("INSERT INTO player (name) VALUES ($1)", &[DbValue::Text(
            "dave".into(),
        )])
        .await
        .unwrap_err();

    assert!(matches!(err, RelayDbError::ExecutionError(_)));
    assert_eq!(
        primary.events(),
        vec![PoolEvent::Acquired, PoolEvent::Released { discarded: true }]
    );
}

#[tokio::test]
async fn acquisition_failure_surfaces_without_running_the_statement() {
    let primary = FakePool::new();
    let replica = FakePool::new();
    primary.push_acquire_error("pool timed out");

    let err = ctx(&primary, &replica)
        .execute("SELECT 1", &[])
        .await
        .unwrap_err();

    assert!(matches!(err, RelayDbError::ConnectionError(_)));
    assert_eq!(primary.events(), vec![PoolEvent::AcquireFailed]);
    assert!(primary.statements().is_empty());
}

#[tokio::test]
async fn read_only_path_uses_the_replica_pool() {
    let primary = FakePool::new();
    let replica = FakePool::new();
    replica.push_rows(vec![make_row(&["n"], vec![DbValue::Int(3)])]);

    let rows = ctx(&primary, &replica)
        .execute_read_only("SELECT count(*) AS n FROM player", &[])
        .await
        .unwrap();

    assert_eq!(rows[0].get("n"), Some(&DbValue::Int(3)));
    assert!(primary.events().is_empty());
    assert_eq!(replica.acquire_count(), 1);
    assert_eq!(replica.release_count(), 1);
}

#[tokio::test]
async fn callback_adapters_deliver_the_result() {
    let primary = FakePool::new();
    let replica = FakePool::new();
    primary.push_rows(vec![make_row(&["id"], vec![DbValue::Int(9)])]);
    replica.push_query_error("relation does not exist");

    let context = ctx(&primary, &replica);

    let mut delivered = None;
    context
        .execute_with("SELECT id FROM player", &[], |result| {
            delivered = Some(result);
        })
        .await;
    let rows = delivered.unwrap().unwrap();
    assert_eq!(rows[0].get("id"), Some(&DbValue::Int(9)));

    let mut delivered = None;
    context
        .execute_read_only_with("SELECT nope FROM missing", &[], |result| {
            delivered = Some(result);
        })
        .await;
    assert!(delivered.unwrap().is_err());
    assert_eq!(
        replica.events(),
        vec![PoolEvent::Acquired, PoolEvent::Released { discarded: true }]
    );
}
