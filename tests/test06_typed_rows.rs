use pg_relay::prelude::*;
use pg_relay::test_utils::{FakePool, make_row};

#[derive(Debug, PartialEq)]
struct Player {
    id: i64,
    name: String,
}

impl FromRow for Player {
    fn from_row(row: &DbRow) -> Result<Self, RelayDbError> {
        Ok(Player {
            id: row
                .require("id")?
                .as_int()
                .ok_or_else(|| RelayDbError::DecodeError("id is not an integer".into()))?,
            name: row
                .require("name")?
                .as_text()
                .ok_or_else(|| RelayDbError::DecodeError("name is not text".into()))?
                .to_string(),
        })
    }
}

#[tokio::test]
async fn rows_decode_into_the_caller_supplied_shape() {
    let primary = FakePool::new();
    let replica = FakePool::new();
    replica.push_rows(vec![
        make_row(&["id", "name"], vec![
            DbValue::Int(1),
            DbValue::Text("alice".into()),
        ]),
        make_row(&["id", "name"], vec![
            DbValue::Int(2),
            DbValue::Text("bob".into()),
        ]),
    ]);

    let players: Vec<Player> = DbContext::with_pools(primary, replica)
        .execute_read_only_as("SELECT id, name FROM player ORDER BY id", &[])
        .await
        .unwrap();

    assert_eq!(players, vec![
        Player {
            id: 1,
            name: "alice".into()
        },
        Player {
            id: 2,
            name: "bob".into()
        },
    ]);
}

#[tokio::test]
async fn shape_mismatch_surfaces_a_decode_error() {
    let primary = FakePool::new();
    let replica = FakePool::new();
    replica.push_rows(vec![make_row(&["id"], vec![DbValue::Int(1)])]);

    let err = DbContext::with_pools(primary, replica)
        .execute_read_only_as::<Player>("SELECT id FROM player", &[])
        .await
        .unwrap_err();

    assert!(matches!(err, RelayDbError::DecodeError(msg) if msg.contains("name")));
}
