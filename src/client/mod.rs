//! The `client` module defines the subscriber side of the broker.
//!
//! It provides the `Mailbox` struct, the bounded, ordered queue a registered
//! subscriber drains at its own pace.

pub mod mailbox;
pub use mailbox::Mailbox;

#[cfg(test)]
mod tests;
