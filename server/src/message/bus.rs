//! In-process broadcast bus
//!
//! Fan-out for resource change events: repositories' callers publish, every
//! connected WebSocket subscriber holds a receiver. Delivery is
//! at-least-once from the client's point of view (a reconnecting client
//! refetches), and slow subscribers are allowed to lag and drop.

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use super::BusMessage;
use crate::utils::AppError;

/// Default broadcast channel capacity
const DEFAULT_CAPACITY: usize = 1024;

/// Message bus — publish/subscribe for change events
#[derive(Debug, Clone)]
pub struct MessageBus {
    tx: broadcast::Sender<BusMessage>,
    shutdown_token: CancellationToken,
}

impl MessageBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Publish a message to all current subscribers
    ///
    /// Publishing with no subscribers is not an error; the message is
    /// simply dropped.
    pub fn publish(&self, msg: BusMessage) -> Result<usize, AppError> {
        match self.tx.send(msg) {
            Ok(n) => Ok(n),
            Err(_) => Ok(0),
        }
    }

    /// Subscribe to all future messages
    pub fn subscribe(&self) -> broadcast::Receiver<BusMessage> {
        self.tx.subscribe()
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Token observed by long-lived subscriber tasks
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown_token
    }

    /// Signal all subscriber tasks to wind down
    pub fn shutdown(&self) {
        tracing::info!("Shutting down message bus");
        self.shutdown_token.cancel();
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}
