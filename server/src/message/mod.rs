//! Message types for the client subscription feed
//!
//! Storefront and admin clients keep a WebSocket open and receive a
//! [`BusMessage`] whenever a watched resource changes, then refetch what
//! they care about.

pub mod bus;

pub use bus::MessageBus;

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Bus event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Resource change signal
    Sync,
    /// Free-form system notification
    Notification,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Sync => write!(f, "sync"),
            EventType::Notification => write!(f, "notification"),
        }
    }
}

/// Resource change signal (server -> all subscribed clients)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncPayload {
    /// Resource type, e.g. "order" or "product"
    pub resource: String,
    /// Per-resource monotonically increasing version
    pub version: u64,
    /// Change kind: "created", "updated", "deleted"
    pub action: String,
    /// Resource id in `"table:key"` form
    pub id: String,
    /// Updated resource data, absent for deletions
    pub data: Option<serde_json::Value>,
}

/// Envelope carried on the bus and over the WebSocket feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusMessage {
    pub request_id: Uuid,
    pub event_type: EventType,
    pub payload: serde_json::Value,
}

impl BusMessage {
    /// Build a sync signal message
    pub fn sync(payload: &SyncPayload) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            event_type: EventType::Sync,
            payload: serde_json::to_value(payload).unwrap_or_default(),
        }
    }

    /// Build a notification message
    pub fn notification(title: &str, message: &str) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            event_type: EventType::Notification,
            payload: serde_json::json!({ "title": title, "message": message }),
        }
    }

    /// Parse the payload back into a sync signal, if this is one
    pub fn as_sync(&self) -> Option<SyncPayload> {
        if self.event_type != EventType::Sync {
            return None;
        }
        serde_json::from_value(self.payload.clone()).ok()
    }
}
