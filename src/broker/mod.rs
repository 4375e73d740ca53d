pub mod delivery;
pub mod engine;
pub mod message;
mod registry;

pub use delivery::{DeliveryReport, Skip};
pub use engine::Broker;
pub use message::Message;
pub use registry::SubscriberId;
