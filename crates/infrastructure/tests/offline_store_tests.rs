use domain::offline::{ActionPayload, OfflineStore};
use domain::Identity;
use infrastructure::SqliteOfflineStore;
use uuid::Uuid;

async fn store() -> SqliteOfflineStore {
    SqliteOfflineStore::new("sqlite::memory:").await.unwrap()
}

fn identity() -> Identity {
    Identity::new(Uuid::new_v4(), Uuid::new_v4())
}

fn add_bin(code: &str) -> ActionPayload {
    ActionPayload::AddBin {
        session_id: Uuid::new_v4(),
        code: code.to_string(),
        tare: 10.0,
        notes: None,
    }
}

#[tokio::test]
async fn append_assigns_increasing_ids_and_zero_retries() {
    let store = store().await;
    let identity = identity();

    let first = store.append(&identity, &add_bin("A")).await.unwrap();
    let second = store.append(&identity, &add_bin("B")).await.unwrap();

    assert!(second.id > first.id);
    assert_eq!(first.retries, 0);
    assert_eq!(store.count().await.unwrap(), 2);
}

#[tokio::test]
async fn pending_returns_fifo_order_with_round_tripped_payloads() {
    let store = store().await;
    let identity = identity();

    store.append(&identity, &add_bin("A")).await.unwrap();
    store.append(&identity, &add_bin("B")).await.unwrap();
    store
        .append(
            &identity,
            &ActionPayload::CloseSession {
                session_id: Uuid::new_v4(),
            },
        )
        .await
        .unwrap();

    let pending = store.pending().await.unwrap();
    let kinds: Vec<&str> = pending.iter().map(|a| a.payload.kind()).collect();
    assert_eq!(kinds, vec!["add_bin", "add_bin", "close_session"]);
    assert_eq!(pending[0].identity, identity);
    match &pending[0].payload {
        ActionPayload::AddBin { code, tare, .. } => {
            assert_eq!(code, "A");
            assert_eq!(*tare, 10.0);
        }
        other => panic!("unexpected payload: {other:?}"),
    }
}

#[tokio::test]
async fn remove_deletes_only_the_named_action() {
    let store = store().await;
    let identity = identity();

    let first = store.append(&identity, &add_bin("A")).await.unwrap();
    let second = store.append(&identity, &add_bin("B")).await.unwrap();

    store.remove(first.id).await.unwrap();
    let pending = store.pending().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, second.id);
}

#[tokio::test]
async fn set_retries_persists() {
    let store = store().await;
    let identity = identity();

    let action = store.append(&identity, &add_bin("A")).await.unwrap();
    store.set_retries(action.id, 2).await.unwrap();

    let pending = store.pending().await.unwrap();
    assert_eq!(pending[0].retries, 2);
}
