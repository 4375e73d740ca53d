mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{
    BrokerSettings, DeliveryPolicy, DeliveryPolicyKind, HistorySettings, LoggingSettings,
    Settings,
};

/// Loads the configuration from `config/default` and `POPCHAT__*` environment
/// variables, then merges whatever was found over `Settings::default()`.
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(
            Environment::with_prefix("POPCHAT")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;
    let partial: PartialSettings = config.try_deserialize()?;
    Ok(merge(partial, Settings::default()))
}

fn merge(partial: PartialSettings, default: Settings) -> Settings {
    let broker = partial.broker;
    let history = partial.history;
    let logging = partial.logging;

    Settings {
        broker: BrokerSettings {
            inbound_capacity: broker
                .as_ref()
                .and_then(|b| b.inbound_capacity)
                .unwrap_or(default.broker.inbound_capacity),
            mailbox_capacity: broker
                .as_ref()
                .and_then(|b| b.mailbox_capacity)
                .unwrap_or(default.broker.mailbox_capacity),
            delivery_policy: broker
                .as_ref()
                .and_then(|b| b.delivery_policy)
                .unwrap_or(default.broker.delivery_policy),
            delivery_timeout_ms: broker
                .as_ref()
                .and_then(|b| b.delivery_timeout_ms)
                .unwrap_or(default.broker.delivery_timeout_ms),
        },
        history: HistorySettings {
            capacity_hint: history
                .and_then(|h| h.capacity_hint)
                .unwrap_or(default.history.capacity_hint),
        },
        logging: LoggingSettings {
            level: logging
                .and_then(|l| l.level)
                .unwrap_or(default.logging.level),
        },
    }
}
