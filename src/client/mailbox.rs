use tokio::sync::mpsc::Receiver;
use tokio::sync::mpsc::error::TryRecvError;

use crate::broker::message::Message;
use crate::broker::SubscriberId;

/// The receiving end of a subscriber's mailbox.
///
/// Returned by [`crate::broker::Broker::register`]. The subscriber owns it
/// and is its only consumer; the broker only holds the sending side. Once the
/// identity is unregistered or registered again, this mailbox stops receiving
/// new messages but keeps whatever was already queued.
#[derive(Debug)]
pub struct Mailbox {
    /// Identity this mailbox was registered under.
    pub id: SubscriberId,

    receiver: Receiver<Message>,
}

impl Mailbox {
    pub(crate) fn new(id: SubscriberId, receiver: Receiver<Message>) -> Self {
        Self { id, receiver }
    }

    /// Wait for the next message. Returns `None` once the mailbox has been
    /// orphaned and fully drained.
    pub async fn recv(&mut self) -> Option<Message> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Result<Message, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Take every message that is queued right now.
    pub fn drain(&mut self) -> Vec<Message> {
        let mut out = Vec::with_capacity(self.receiver.len());
        while let Ok(msg) = self.receiver.try_recv() {
            out.push(msg);
        }
        out
    }

    /// Number of queued messages.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}
