use super::Lifecycle;
use std::time::Duration;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

#[test]
fn test_new_lifecycle_is_running() {
    let lifecycle = Lifecycle::new();
    assert!(!lifecycle.is_cancelled());
    assert!(!lifecycle.is_stopped());
}

#[test]
fn test_cancel_is_idempotent() {
    let lifecycle = Lifecycle::new();
    lifecycle.cancel();
    lifecycle.cancel();
    assert!(lifecycle.is_cancelled());
    assert!(!lifecycle.is_stopped());
}

#[test]
fn test_from_token_follows_external_token() {
    let token = CancellationToken::new();
    let lifecycle = Lifecycle::from_token(token.clone());
    token.cancel();
    assert!(lifecycle.is_cancelled());
}

#[test]
fn test_child_is_cancelled_with_parent_only() {
    let parent = Lifecycle::new();
    let child = parent.child();
    child.cancel();
    assert!(child.is_cancelled());
    assert!(!parent.is_cancelled());

    let other = parent.child();
    parent.cancel();
    assert!(other.is_cancelled());
}

#[tokio::test]
async fn test_cancelled_wakes_waiter() {
    let lifecycle = Lifecycle::new();
    let waiter = {
        let lifecycle = lifecycle.clone();
        tokio::spawn(async move { lifecycle.cancelled().await })
    };
    lifecycle.cancel();
    timeout(Duration::from_millis(100), waiter)
        .await
        .expect("waiter not woken")
        .unwrap();
}

#[tokio::test]
async fn test_stopped_is_observable_repeatedly() {
    let lifecycle = Lifecycle::new();
    let waiters: Vec<_> = (0..3)
        .map(|_| {
            let lifecycle = lifecycle.clone();
            tokio::spawn(async move { lifecycle.stopped().await })
        })
        .collect();

    lifecycle.mark_stopped();
    lifecycle.mark_stopped();

    for waiter in futures::future::join_all(waiters).await {
        waiter.unwrap();
    }
    // Already fired: awaiting again returns immediately.
    timeout(Duration::from_millis(50), lifecycle.stopped())
        .await
        .expect("stopped signal should stay fired");
    assert!(lifecycle.is_stopped());
}
