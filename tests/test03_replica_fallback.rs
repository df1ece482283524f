use pg_relay::prelude::*;
use pg_relay::test_utils::{FakePool, PoolEvent, make_row};

const LOOKUP: &str = "SELECT id, name FROM player WHERE id = $1";

#[tokio::test]
async fn empty_replica_result_falls_back_to_the_primary() {
    let primary = FakePool::new();
    let replica = FakePool::new();
    replica.push_rows(Vec::new());
    primary.push_rows(vec![make_row(&["id", "name"], vec![
        DbValue::Int(1),
        DbValue::Text("freshly written".into()),
    ])]);

    let rows = DbContext::with_pools(primary.clone(), replica.clone())
        .execute_read_only_with_fallback(LOOKUP, &[DbValue::Int(1)])
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].get("name"),
        Some(&DbValue::Text("freshly written".into()))
    );
    // The identical statement reached both pools, one clean lease each.
    assert_eq!(replica.statements(), vec![LOOKUP.to_string()]);
    assert_eq!(primary.statements(), vec![LOOKUP.to_string()]);
    assert_eq!(
        replica.events(),
        vec![PoolEvent::Acquired, PoolEvent::Released { discarded: false }]
    );
    assert_eq!(
        primary.events(),
        vec![PoolEvent::Acquired, PoolEvent::Released { discarded: false }]
    );
}

#[tokio::test]
async fn replica_rows_skip_the_primary_entirely() {
    let primary = FakePool::new();
    let replica = FakePool::new();
    replica.push_rows(vec![make_row(&["id", "name"], vec![
        DbValue::Int(1),
        DbValue::Text("cached".into()),
    ])]);

    let rows = DbContext::with_pools(primary.clone(), replica.clone())
        .execute_read_only_with_fallback(LOOKUP, &[DbValue::Int(1)])
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert!(primary.events().is_empty());
    assert!(primary.statements().is_empty());
}

#[tokio::test]
async fn replica_error_propagates_without_retrying_the_primary() {
    let primary = FakePool::new();
    let replica = FakePool::new();
    replica.push_query_error("canceling statement due to conflict with recovery");

    let err = DbContext::with_pools(primary.clone(), replica.clone())
        .execute_read_only_with_fallback(LOOKUP, &[DbValue::Int(1)])
        .await
        .unwrap_err();

    assert!(matches!(err, RelayDbError::ExecutionError(_)));
    assert!(primary.events().is_empty());
    assert_eq!(
        replica.events(),
        vec![PoolEvent::Acquired, PoolEvent::Released { discarded: true }]
    );
}
