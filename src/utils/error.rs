//! The `error` module defines the error types returned by the broker.
//!
//! Only conditions the caller has to react to are errors. Per-recipient
//! delivery outcomes (unknown recipient, full or closed mailbox) are reported
//! through [`crate::broker::DeliveryReport`] instead, because a message that
//! reached some recipients and skipped others was still routed.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BrokerError {
    /// The broker's lifecycle was cancelled before the operation started.
    #[error("broker lifecycle has been cancelled")]
    LifecycleCancelled,

    /// The inbound queue is at capacity and the caller asked not to wait.
    #[error("broker inbound queue is full")]
    QueueFull,

    /// `run` was called on a broker whose event loop already started.
    #[error("broker event loop is already running")]
    AlreadyRunning,
}

pub type BrokerResult<T> = Result<T, BrokerError>;
