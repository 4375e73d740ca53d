//! Per-message delivery outcome
//!
//! The broker never retries and never fails a whole delivery because one
//! recipient could not take the message. Instead every recipient ends up in
//! exactly one of the two lists of a `DeliveryReport`.

use crate::broker::registry::SubscriberId;

/// Why a recipient did not receive a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// Unicast to an identity that is not registered.
    NotRegistered,
    /// The mailbox was full and the policy does not wait.
    MailboxFull,
    /// The mailbox stayed full for the whole delivery timeout.
    TimedOut,
    /// The subscriber dropped its mailbox without unregistering.
    MailboxClosed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: Vec<SubscriberId>,
    pub skipped: Vec<(SubscriberId, Skip)>,
}

impl DeliveryReport {
    pub(crate) fn not_registered(recipient: SubscriberId) -> Self {
        Self {
            delivered: Vec::new(),
            skipped: vec![(recipient, Skip::NotRegistered)],
        }
    }

    pub fn delivered_to(&self, identity: &str) -> bool {
        self.delivered.iter().any(|id| id == identity)
    }

    /// The reason `identity` was skipped, if it was.
    pub fn skip_reason(&self, identity: &str) -> Option<Skip> {
        self.skipped
            .iter()
            .find(|(id, _)| id == identity)
            .map(|(_, skip)| *skip)
    }

    /// True when nobody was skipped.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}
