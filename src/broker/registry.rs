//! Subscriber registry
//!
//! A `Registry` maps a subscriber identity to the sending side of that
//! subscriber's mailbox. Registering an identity again replaces the previous
//! mailbox; the old one is abandoned, not closed or drained.
//!
//! Concurrency note: the map lives behind an `RwLock`. Lookups and broadcast
//! snapshots take the read lock, registration and removal take the write
//! lock. Guards are never held across an `.await`, so the registry can be
//! used from any task while deliveries are in flight.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::mpsc::Sender;

use crate::broker::message::Message;

pub type SubscriberId = String;

pub(crate) type MailboxSender = Sender<Message>;

#[derive(Debug, Default)]
pub(crate) struct Registry {
    subscribers: RwLock<HashMap<SubscriberId, MailboxSender>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `identity` with `mailbox`, replacing any prior association.
    pub(crate) fn register(&self, identity: impl Into<SubscriberId>, mailbox: MailboxSender) {
        self.write().insert(identity.into(), mailbox);
    }

    /// Remove `identity`. Returns `false` if it was not registered.
    pub fn unregister(&self, identity: &str) -> bool {
        self.write().remove(identity).is_some()
    }

    pub(crate) fn lookup(&self, identity: &str) -> Option<MailboxSender> {
        self.read().get(identity).cloned()
    }

    /// Every current registration, read under a single lock acquisition.
    pub(crate) fn snapshot(&self) -> Vec<(SubscriberId, MailboxSender)> {
        self.read()
            .iter()
            .map(|(id, tx)| (id.clone(), tx.clone()))
            .collect()
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.read().contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    // A panic while holding the guard cannot leave the map half-updated:
    // every critical section is a single HashMap call.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<SubscriberId, MailboxSender>> {
        self.subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<SubscriberId, MailboxSender>> {
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
