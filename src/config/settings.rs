use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes settings for the message broker, the history store and logging.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub broker: BrokerSettings,
    pub history: HistorySettings,
    pub logging: LoggingSettings,
}

/// Configuration settings for the broker.
///
/// Controls the inbound queue size, the default mailbox size handed out by
/// the demo binary, and how a push onto a full mailbox behaves.
#[derive(Debug, Deserialize, Clone)]
pub struct BrokerSettings {
    pub inbound_capacity: usize,
    pub mailbox_capacity: usize,
    pub delivery_policy: DeliveryPolicyKind,
    pub delivery_timeout_ms: u64,
}

/// How a delivery treats a recipient whose mailbox is full.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryPolicyKind {
    Block,
    Timeout,
    Reject,
}

/// Configuration settings for the message history store.
#[derive(Debug, Deserialize, Clone)]
pub struct HistorySettings {
    pub capacity_hint: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// Resolved delivery policy with its timeout attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryPolicy {
    /// Wait for mailbox space indefinitely. A slow subscriber stalls the
    /// delivery path, including the broker loop.
    Block,
    /// Wait at most the given duration, then skip the recipient.
    Timeout(Duration),
    /// Never wait; a full mailbox is skipped immediately.
    Reject,
}

impl BrokerSettings {
    pub fn delivery_policy(&self) -> DeliveryPolicy {
        match self.delivery_policy {
            DeliveryPolicyKind::Block => DeliveryPolicy::Block,
            DeliveryPolicyKind::Timeout => {
                DeliveryPolicy::Timeout(Duration::from_millis(self.delivery_timeout_ms))
            }
            DeliveryPolicyKind::Reject => DeliveryPolicy::Reject,
        }
    }
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub broker: Option<PartialBrokerSettings>,
    pub history: Option<PartialHistorySettings>,
    pub logging: Option<PartialLoggingSettings>,
}

/// Partial broker settings.
#[derive(Debug, Deserialize)]
pub struct PartialBrokerSettings {
    pub inbound_capacity: Option<usize>,
    pub mailbox_capacity: Option<usize>,
    pub delivery_policy: Option<DeliveryPolicyKind>,
    pub delivery_timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct PartialHistorySettings {
    pub capacity_hint: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

impl Default for BrokerSettings {
    fn default() -> Self {
        Self {
            inbound_capacity: 100,
            mailbox_capacity: 16,
            delivery_policy: DeliveryPolicyKind::Timeout,
            delivery_timeout_ms: 1000,
        }
    }
}

/// Provides default values for `Settings`.
///
/// Ensures the application has sensible defaults if no configuration is provided.
impl Default for Settings {
    fn default() -> Self {
        Self {
            broker: BrokerSettings::default(),
            history: HistorySettings { capacity_hint: 100 },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}
