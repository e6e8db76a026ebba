//! Order status machine
//!
//! Defines the order lifecycle and the only legal transitions through it:
//!
//! ```text
//! pending -> accepted -> ready -> completed
//!    |           |          |
//!    +-----------+----------+--> cancelled
//! ```
//!
//! `completed` and `cancelled` are terminal. Every status write in the
//! system goes through [`OrderStatus::transition_to`]; there is no generic
//! update path that can bypass the table.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Accepted,
    Ready,
    Completed,
    Cancelled,
}

/// Rejected status transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal transition: {from} -> {to}")]
pub struct TransitionError {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

impl OrderStatus {
    /// Statuses reachable from this one
    pub fn allowed_targets(self) -> &'static [OrderStatus] {
        match self {
            Self::Pending => &[Self::Accepted, Self::Cancelled],
            Self::Accepted => &[Self::Ready, Self::Cancelled],
            Self::Ready => &[Self::Completed, Self::Cancelled],
            Self::Completed | Self::Cancelled => &[],
        }
    }

    /// Whether the order can still change status
    pub fn is_terminal(self) -> bool {
        self.allowed_targets().is_empty()
    }

    /// Validate a requested transition against the table
    pub fn transition_to(self, target: OrderStatus) -> Result<OrderStatus, TransitionError> {
        if self.allowed_targets().contains(&target) {
            Ok(target)
        } else {
            Err(TransitionError {
                from: self,
                to: target,
            })
        }
    }

    /// Wire name used in API payloads and the database
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Ready => "ready",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
