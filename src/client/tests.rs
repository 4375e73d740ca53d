use super::Mailbox;
use crate::broker::message::Message;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

#[test]
fn test_mailbox_new_is_empty() {
    let (_tx, rx) = mpsc::channel::<Message>(2);
    let mut mailbox = Mailbox::new("alice".to_string(), rx);
    assert_eq!(mailbox.id, "alice");
    assert!(mailbox.is_empty());
    assert_eq!(mailbox.try_recv(), Err(TryRecvError::Empty));
}

#[test]
fn test_mailbox_drain_preserves_order() {
    let (tx, rx) = mpsc::channel::<Message>(4);
    let mut mailbox = Mailbox::new("alice".to_string(), rx);
    for content in ["one", "two", "three"] {
        tx.try_send(Message::unicast("bob", "alice", content)).unwrap();
    }
    assert_eq!(mailbox.len(), 3);

    let contents: Vec<_> = mailbox.drain().into_iter().map(|m| m.content).collect();
    assert_eq!(contents, vec!["one", "two", "three"]);
    assert!(mailbox.is_empty());
}

#[tokio::test]
async fn test_mailbox_recv_returns_none_when_orphaned() {
    let (tx, rx) = mpsc::channel::<Message>(1);
    let mut mailbox = Mailbox::new("alice".to_string(), rx);
    tx.send(Message::broadcast("bob", "last")).await.unwrap();
    drop(tx);

    assert_eq!(mailbox.recv().await.unwrap().content, "last");
    assert!(mailbox.recv().await.is_none());
}
