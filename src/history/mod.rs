//! The `history` module keeps an in-memory record of chat messages.
//!
//! Callers append a message once they have accepted it; the broker never
//! writes here on its own. Records are kept in append order and can be read
//! back in full or filtered by sender.

pub mod store;

pub use store::{HistoryStore, StoredMessage};

#[cfg(test)]
mod tests;
