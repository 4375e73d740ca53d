//! Message definitions for the broker
//!
//! `Message` is the value routed by the broker. It is immutable once built:
//! the broker clones it per recipient and never rewrites any field.
//!
//! Notes on fields:
//! - `sender`: identity of the producer; non-empty by convention only
//! - `recipient`: target identity, ignored when `broadcast` is set
//! - `content`: opaque payload
//! - `broadcast`: fan out to every registered subscriber
//! - `timestamp`: milliseconds since UNIX epoch, set by the producer

use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: String,
    pub recipient: String,
    pub content: String,
    pub broadcast: bool,
    pub timestamp: i64,
}

impl Message {
    /// Build a message addressed to a single recipient, stamped with the
    /// current time.
    pub fn unicast(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            content: content.into(),
            broadcast: false,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Build a message for every registered subscriber, stamped with the
    /// current time.
    pub fn broadcast(sender: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            recipient: String::new(),
            content: content.into(),
            broadcast: true,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }
}
