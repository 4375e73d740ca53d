//! The `utils` module provides shared definitions used across the `popchat`
//! crate: the broker error type and logging initialization.

pub mod error;
pub mod logging;

pub use error::{BrokerError, BrokerResult};
