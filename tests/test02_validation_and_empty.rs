use pg_relay::prelude::*;
use pg_relay::test_utils::FakePool;

#[tokio::test]
async fn zero_rows_resolve_to_an_empty_sequence() {
    let primary = FakePool::new();
    let replica = FakePool::new();
    primary.push_rows(Vec::new());

    let rows = DbContext::with_pools(primary, replica)
        .execute("SELECT 1 WHERE false", &[])
        .await
        .unwrap();

    assert!(rows.is_empty());
}

#[tokio::test]
async fn blank_statement_is_rejected_before_any_pool_contact() {
    let primary = FakePool::new();
    let replica = FakePool::new();
    let context = DbContext::with_pools(primary.clone(), replica.clone());

    for statement in ["", "   \n\t"] {
        let err = context.execute(statement, &[]).await.unwrap_err();
        assert!(matches!(err, RelayDbError::InvalidStatement(_)));

        let err = context.execute_read_only(statement, &[]).await.unwrap_err();
        assert!(matches!(err, RelayDbError::InvalidStatement(_)));

        let err = context
            .execute_read_only_with_fallback(statement, &[])
            .await
            .unwrap_err();
        assert!(matches!(err, RelayDbError::InvalidStatement(_)));
    }

    assert!(primary.events().is_empty());
    assert!(replica.events().is_empty());
}
