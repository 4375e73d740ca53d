//! Append-only message history
//!
//! Only `sender`, `content` and `timestamp` of a message are retained; the
//! recipient and broadcast flag are routing details. Entries are never
//! rewritten or reordered after `append`, and `query` always hands out a
//! copy, so a returned `Vec` never reflects later appends.

use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use serde::{Deserialize, Serialize};

use crate::broker::Message;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub sender: String,
    pub content: String,
    pub timestamp: i64,
}

impl From<&Message> for StoredMessage {
    fn from(msg: &Message) -> Self {
        Self {
            sender: msg.sender.clone(),
            content: msg.content.clone(),
            timestamp: msg.timestamp,
        }
    }
}

#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: RwLock<Vec<StoredMessage>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the store for `capacity` entries. It still grows past that.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(Vec::with_capacity(capacity)),
        }
    }

    /// Record `msg` at the end of the history.
    pub fn append(&self, msg: &Message) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(StoredMessage::from(msg));
    }

    /// Snapshot of the history in append order. With `None` or an empty
    /// sender every entry is returned, otherwise only exact sender matches.
    pub fn query(&self, sender: Option<&str>) -> Vec<StoredMessage> {
        let entries = self.read();
        match sender.filter(|s| !s.is_empty()) {
            None => entries.clone(),
            Some(sender) => entries
                .iter()
                .filter(|m| m.sender == sender)
                .cloned()
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<StoredMessage>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }
}
