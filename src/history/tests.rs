use super::{HistoryStore, StoredMessage};
use crate::broker::Message;
use std::sync::Arc;

fn stored(sender: &str, content: &str, timestamp: i64) -> StoredMessage {
    StoredMessage {
        sender: sender.to_string(),
        content: content.to_string(),
        timestamp,
    }
}

fn sample_store() -> HistoryStore {
    let store = HistoryStore::new();
    store.append(&Message::unicast("alice", "bob", "m1").with_timestamp(1));
    store.append(&Message::broadcast("bob", "m2").with_timestamp(2));
    store.append(&Message::unicast("alice", "carol", "m3").with_timestamp(3));
    store
}

#[test]
fn test_empty_store() {
    let store = HistoryStore::with_capacity(100);
    assert!(store.is_empty());
    assert!(store.query(None).is_empty());
    assert!(store.query(Some("alice")).is_empty());
}

#[test]
fn test_query_all_in_append_order() {
    let store = sample_store();
    assert_eq!(store.len(), 3);
    assert_eq!(
        store.query(None),
        vec![stored("alice", "m1", 1), stored("bob", "m2", 2), stored("alice", "m3", 3)]
    );
}

#[test]
fn test_empty_sender_means_all() {
    let store = sample_store();
    assert_eq!(store.query(Some("")), store.query(None));
}

#[test]
fn test_query_by_sender_preserves_order() {
    let store = sample_store();
    assert_eq!(
        store.query(Some("alice")),
        vec![stored("alice", "m1", 1), stored("alice", "m3", 3)]
    );
    assert_eq!(store.query(Some("bob")), vec![stored("bob", "m2", 2)]);
    assert!(store.query(Some("dave")).is_empty());
}

#[test]
fn test_sender_match_is_exact() {
    let store = sample_store();
    assert!(store.query(Some("Alice")).is_empty());
    assert!(store.query(Some("ali")).is_empty());
}

#[test]
fn test_query_is_a_snapshot() {
    let store = sample_store();
    let before = store.query(None);
    store.append(&Message::broadcast("carol", "m4"));

    assert_eq!(before.len(), 3);
    assert_eq!(store.query(None).len(), 4);
    // Repeated queries leave the store untouched.
    assert_eq!(store.query(Some("alice")), store.query(Some("alice")));
    assert_eq!(store.len(), 4);
}

#[test]
fn test_grows_past_capacity_hint() {
    let store = HistoryStore::with_capacity(2);
    for i in 0..5 {
        store.append(&Message::broadcast("alice", format!("m{i}")).with_timestamp(i));
    }
    let contents: Vec<_> = store.query(None).into_iter().map(|m| m.content).collect();
    assert_eq!(contents, vec!["m0", "m1", "m2", "m3", "m4"]);
}

#[test]
fn test_serialization_roundtrip() {
    let msg = stored("alice", "{\"key\":42}", 1725000000);
    let data = serde_json::to_vec(&msg).unwrap();
    let parsed: StoredMessage = serde_json::from_slice(&data).unwrap();
    assert_eq!(msg, parsed);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_appends_keep_per_sender_order() {
    let store = Arc::new(HistoryStore::new());
    let writers = ["alice", "bob", "carol", "dave"].map(|sender| {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            for i in 0..50 {
                store.append(&Message::broadcast(sender, i.to_string()).with_timestamp(i));
            }
        })
    });
    for writer in futures::future::join_all(writers).await {
        writer.unwrap();
    }

    assert_eq!(store.len(), 200);
    for sender in ["alice", "bob", "carol", "dave"] {
        let seen: Vec<i64> = store
            .query(Some(sender))
            .into_iter()
            .map(|m| m.timestamp)
            .collect();
        assert_eq!(seen, (0..50).collect::<Vec<i64>>());
    }
}
