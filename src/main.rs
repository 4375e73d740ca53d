//! CLI for PopChat
//!
//! Subcommands:
//! - `demo`: replay a scripted chat through the broker and print the history

use std::sync::Arc;

use clap::Parser;
use popchat::broker::{Broker, Message};
use popchat::config::{Settings, load_config};
use popchat::history::HistoryStore;
use popchat::lifecycle::Lifecycle;
use popchat::utils::{BrokerError, logging};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "popchat")]
enum Command {
    /// Register users, send a broadcast and some direct messages, then print the history
    Demo {
        /// Comma-separated subscriber identities
        #[arg(long, value_delimiter = ',', default_value = "alice,bob")]
        users: Vec<String>,
        /// Identity the messages are sent from
        #[arg(long, default_value = "carol")]
        sender: String,
        /// Number of direct messages, spread round-robin over the users
        #[arg(long, default_value_t = 3)]
        messages: usize,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cmd = Command::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            logging::init("info");
            error!("Failed to load configuration: {}", e);
            return;
        }
    };
    logging::init(&config.logging.level);

    match cmd {
        Command::Demo {
            users,
            sender,
            messages,
        } => {
            if let Err(e) = run_demo(config, users, sender, messages).await {
                error!("Demo failed: {}", e);
            }
        }
    }
}

async fn run_demo(
    config: Settings,
    users: Vec<String>,
    sender: String,
    messages: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let lifecycle = Lifecycle::new();
    let broker = Arc::new(Broker::with_lifecycle(lifecycle.clone(), &config.broker));
    let history = HistoryStore::with_capacity(config.history.capacity_hint);
    let event_loop = broker.spawn();

    // Each drainer owns its mailbox and reads until the mailbox is orphaned.
    let drainers: Vec<JoinHandle<()>> = users
        .iter()
        .map(|user| {
            let mut mailbox = broker.register(user.as_str(), config.broker.mailbox_capacity);
            tokio::spawn(async move {
                while let Some(msg) = mailbox.recv().await {
                    info!("{} <- {}: {}", mailbox.id, msg.sender, msg.content);
                }
            })
        })
        .collect();

    let script = async {
        let greeting = Message::broadcast(sender.as_str(), "hi everyone");
        let direct = users
            .iter()
            .cycle()
            .take(messages)
            .enumerate()
            .map(|(i, recipient)| {
                Message::unicast(sender.as_str(), recipient.as_str(), format!("message {i}"))
            });

        for msg in std::iter::once(greeting).chain(direct) {
            let report = broker.deliver(msg.clone()).await?;
            for (id, skip) in &report.skipped {
                warn!("Message from {} not delivered to {}: {:?}", msg.sender, id, skip);
            }
            if !report.delivered.is_empty() {
                history.append(&msg);
            }
        }
        Ok::<(), BrokerError>(())
    };

    let (outcome, interrupted) = tokio::select! {
        result = script => (result, false),
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received. Exiting gracefully.");
            (Ok(()), true)
        }
    };

    // Release every mailbox before waiting for the loop: a delivery parked
    // on a full mailbox only returns once its receiver is gone.
    for user in &users {
        broker.unregister(user);
    }
    for drainer in drainers {
        if interrupted || outcome.is_err() {
            drainer.abort();
        }
        let _ = drainer.await;
    }

    lifecycle.cancel();
    lifecycle.stopped().await;
    event_loop.await??;
    outcome?;

    println!("{}", serde_json::to_string_pretty(&history.query(None))?);
    Ok(())
}
