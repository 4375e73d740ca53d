//! Broker lifecycle
//!
//! A `Lifecycle` pairs two one-shot signals:
//! - `cancel`: requested by the owner; the broker loop selects on it and
//!   stops dequeuing once it fires
//! - `stopped`: fired by the broker loop after it has exited
//!
//! Both are `CancellationToken`s, so firing is idempotent and any number of
//! tasks can await either signal, before or after it fires. Nothing resets a
//! fired signal.
//!
//! A `Lifecycle` belongs to one broker: the first loop to exit fires its
//! stopped signal. Brokers that should stop together each take a `child()`
//! of a shared parent.

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    cancel: CancellationToken,
    stopped: CancellationToken,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing cancellation token, so cancelling it (or any of its
    /// parents) stops the broker.
    pub fn from_token(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            stopped: CancellationToken::new(),
        }
    }

    /// A lifecycle that is cancelled together with `self` but can also be
    /// cancelled on its own. It has its own stopped signal.
    pub fn child(&self) -> Self {
        Self::from_token(self.cancel.child_token())
    }

    /// Request shutdown. Calling it more than once has no further effect.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Resolves once shutdown has been requested.
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await;
    }

    /// Resolves once the broker loop has exited.
    pub async fn stopped(&self) {
        self.stopped.cancelled().await;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.is_cancelled()
    }

    pub(crate) fn mark_stopped(&self) {
        self.stopped.cancel();
    }
}

#[cfg(test)]
mod tests;
