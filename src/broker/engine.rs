//! Broker engine
//!
//! This module contains the in-process router responsible for:
//! - registering and unregistering subscriber mailboxes
//! - delivering a message to one recipient or broadcasting it to all
//! - draining the bounded inbound queue from a single event loop
//! - stopping that loop when the lifecycle is cancelled
//!
//! Concurrency and usage notes:
//! - Every method takes `&self`; share the broker as `Arc<Broker>`. The only
//!   lock is the registry's, and it is released before any mailbox push.
//! - `deliver` is the synchronous entry point (the caller awaits the pushes);
//!   `submit`/`try_submit` hand the message to the event loop instead.
//! - How a push onto a full mailbox behaves is set by `DeliveryPolicy`. With
//!   `Block`, one slow subscriber stalls the rest of a broadcast and every
//!   later loop iteration.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::sync::mpsc::error::{SendTimeoutError, TrySendError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::broker::delivery::{DeliveryReport, Skip};
use crate::broker::message::Message;
use crate::broker::registry::{MailboxSender, Registry, SubscriberId};
use crate::client::Mailbox;
use crate::config::{BrokerSettings, DeliveryPolicy};
use crate::lifecycle::Lifecycle;
use crate::utils::{BrokerError, BrokerResult};

#[derive(Debug)]
pub struct Broker {
    registry: Registry,
    inbound: Sender<Message>,
    queue: Mutex<Option<Receiver<Message>>>,
    lifecycle: Lifecycle,
    policy: DeliveryPolicy,
}

impl Broker {
    /// Create a broker that stops once `cancel` is cancelled.
    pub fn new(cancel: CancellationToken, settings: &BrokerSettings) -> Self {
        Self::with_lifecycle(Lifecycle::from_token(cancel), settings)
    }

    /// Create a broker driven by `lifecycle`. The lifecycle must not be
    /// handed to another broker; use `Lifecycle::child` to share a parent.
    pub fn with_lifecycle(lifecycle: Lifecycle, settings: &BrokerSettings) -> Self {
        let (inbound, queue) = mpsc::channel(settings.inbound_capacity.max(1));
        Self {
            registry: Registry::new(),
            inbound,
            queue: Mutex::new(Some(queue)),
            lifecycle,
            policy: settings.delivery_policy(),
        }
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Register `identity` with a fresh mailbox of `capacity` messages
    /// (at least one). A previous mailbox for the same identity is orphaned.
    pub fn register(&self, identity: impl Into<SubscriberId>, capacity: usize) -> Mailbox {
        let identity = identity.into();
        let (tx, rx) = mpsc::channel(capacity.max(1));
        self.registry.register(identity.clone(), tx);
        debug!("Registered subscriber {identity}");
        Mailbox::new(identity, rx)
    }

    /// Remove `identity`. Unknown identities are ignored.
    pub fn unregister(&self, identity: &str) {
        if self.registry.unregister(identity) {
            debug!("Unregistered subscriber {identity}");
        }
    }

    pub fn is_registered(&self, identity: &str) -> bool {
        self.registry.contains(identity)
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.len()
    }

    /// Route `msg` to its recipient, or to every registered subscriber when
    /// it is a broadcast.
    ///
    /// The broadcast recipient set is read in one registry snapshot, so a
    /// subscriber registered while the fan-out is running does not see the
    /// message. Recipients that could not take the message are listed in the
    /// returned report; that includes a unicast recipient that is not
    /// registered. The only error is a cancelled lifecycle, in which case
    /// nothing is delivered.
    pub async fn deliver(&self, msg: Message) -> BrokerResult<DeliveryReport> {
        if self.lifecycle.is_cancelled() {
            return Err(BrokerError::LifecycleCancelled);
        }

        let targets = if msg.broadcast {
            self.registry.snapshot()
        } else {
            match self.registry.lookup(&msg.recipient) {
                Some(tx) => vec![(msg.recipient.clone(), tx)],
                None => {
                    debug!("Dropping message for unregistered recipient {}", msg.recipient);
                    return Ok(DeliveryReport::not_registered(msg.recipient));
                }
            }
        };

        let mut report = DeliveryReport::default();
        for (id, tx) in targets {
            match self.push(&tx, msg.clone()).await {
                Ok(()) => report.delivered.push(id),
                Err(skip) => {
                    debug!("Skipped delivery to {id}: {skip:?}");
                    report.skipped.push((id, skip));
                }
            }
        }
        Ok(report)
    }

    async fn push(&self, tx: &MailboxSender, msg: Message) -> Result<(), Skip> {
        match self.policy {
            DeliveryPolicy::Block => tx.send(msg).await.map_err(|_| Skip::MailboxClosed),
            DeliveryPolicy::Timeout(limit) => {
                tx.send_timeout(msg, limit).await.map_err(|e| match e {
                    SendTimeoutError::Timeout(_) => Skip::TimedOut,
                    SendTimeoutError::Closed(_) => Skip::MailboxClosed,
                })
            }
            DeliveryPolicy::Reject => tx.try_send(msg).map_err(|e| match e {
                TrySendError::Full(_) => Skip::MailboxFull,
                TrySendError::Closed(_) => Skip::MailboxClosed,
            }),
        }
    }

    /// Enqueue `msg` for the event loop, waiting while the queue is full.
    ///
    /// The wait ends with `LifecycleCancelled` as soon as the lifecycle is
    /// cancelled, and every call made after that is rejected the same way.
    pub async fn submit(&self, msg: Message) -> BrokerResult<()> {
        if self.lifecycle.is_cancelled() {
            return Err(BrokerError::LifecycleCancelled);
        }
        tokio::select! {
            biased;
            _ = self.lifecycle.cancelled() => Err(BrokerError::LifecycleCancelled),
            sent = self.inbound.send(msg) => sent.map_err(|_| BrokerError::LifecycleCancelled),
        }
    }

    /// Enqueue `msg` without waiting. Fails with `QueueFull` when the queue
    /// is at capacity.
    pub fn try_submit(&self, msg: Message) -> BrokerResult<()> {
        if self.lifecycle.is_cancelled() {
            return Err(BrokerError::LifecycleCancelled);
        }
        self.inbound.try_send(msg).map_err(|e| match e {
            TrySendError::Full(_) => BrokerError::QueueFull,
            TrySendError::Closed(_) => BrokerError::LifecycleCancelled,
        })
    }

    /// Run the event loop until the lifecycle is cancelled.
    ///
    /// Messages are delivered one at a time in queue order. Cancellation is
    /// checked before every dequeue; a delivery already in progress runs to
    /// completion. On exit the inbound queue is closed, anything still in it
    /// is dropped, and the lifecycle's stopped signal fires.
    pub async fn run(&self) -> BrokerResult<()> {
        let mut queue = self
            .queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or(BrokerError::AlreadyRunning)?;

        info!("Broker loop started");
        loop {
            tokio::select! {
                biased;
                _ = self.lifecycle.cancelled() => break,
                next = queue.recv() => match next {
                    Some(msg) => {
                        if let Err(e) = self.deliver(msg).await {
                            debug!("Queued message not delivered: {e}");
                        }
                    }
                    None => break,
                },
            }
        }

        queue.close();
        let dropped = queue.len();
        drop(queue);
        self.lifecycle.mark_stopped();
        info!("Broker loop stopped, {dropped} queued message(s) dropped");
        Ok(())
    }

    /// Spawn `run` on the current tokio runtime.
    pub fn spawn(self: &Arc<Self>) -> JoinHandle<BrokerResult<()>> {
        let broker = Arc::clone(self);
        tokio::spawn(async move { broker.run().await })
    }
}
