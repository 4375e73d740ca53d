//! # PopChat
//!
//! `popchat` is a small in-process publish/subscribe broker for chat
//! messages. A message is either delivered to one named subscriber or
//! broadcast to every subscriber registered at that moment. Subscribers come
//! and go while deliveries are running, and the whole broker stops when its
//! lifecycle is cancelled.
//!
//! ## Core Modules
//!
//! - `broker`: the subscriber registry, message routing and the event loop.
//! - `client`: the `Mailbox` a registered subscriber reads from.
//! - `lifecycle`: cancellation and the one-shot stopped signal.
//! - `history`: an append-only, sender-filterable record of messages.
//! - `config`: loading broker, history and logging settings.
//! - `utils`: the error type and logging initialization.

pub mod broker;
pub mod client;
pub mod config;
pub mod history;
pub mod lifecycle;
pub mod utils;
