//! Staff action tokens
//!
//! Inline buttons on the staff order message carry a callback token of the
//! form `<verb>_order_<orderId>`. This module owns both directions: token
//! generation for outgoing keyboards and parsing for inbound callbacks.

use thiserror::Error;

use crate::orders::OrderStatus;

/// The four staff actions available on an order message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    Accept,
    Ready,
    Complete,
    Cancel,
}

/// Callback token that does not match `<verb>_order_<orderId>`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized action token: {token}")]
pub struct ActionParseError {
    pub token: String,
}

impl OrderAction {
    pub const ALL: [OrderAction; 4] = [Self::Accept, Self::Ready, Self::Complete, Self::Cancel];

    /// Verb used in the callback token
    pub fn verb(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Ready => "ready",
            Self::Complete => "complete",
            Self::Cancel => "cancel",
        }
    }

    /// Button caption shown to staff
    pub fn label(self) -> &'static str {
        match self {
            Self::Accept => "✅ Accept",
            Self::Ready => "📦 Ready",
            Self::Complete => "🏁 Complete",
            Self::Cancel => "❌ Cancel",
        }
    }

    /// Status this action transitions the order to
    pub fn target_status(self) -> OrderStatus {
        match self {
            Self::Accept => OrderStatus::Accepted,
            Self::Ready => OrderStatus::Ready,
            Self::Complete => OrderStatus::Completed,
            Self::Cancel => OrderStatus::Cancelled,
        }
    }

    /// Action that would move an order to `target`, if any
    pub fn for_target(target: OrderStatus) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.target_status() == target)
    }

    /// Callback token for an order key
    pub fn token(self, order_key: &str) -> String {
        format!("{}_order_{order_key}", self.verb())
    }

    /// Parse a callback token into the action and the order key
    pub fn parse_token(token: &str) -> Result<(Self, String), ActionParseError> {
        for action in Self::ALL {
            let prefix = format!("{}_order_", action.verb());
            if let Some(key) = token.strip_prefix(&prefix) {
                if key.is_empty() {
                    break;
                }
                return Ok((action, key.to_string()));
            }
        }
        Err(ActionParseError {
            token: token.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        for action in OrderAction::ALL {
            let token = action.token("abc123");
            let (parsed, key) = OrderAction::parse_token(&token).unwrap();
            assert_eq!(parsed, action);
            assert_eq!(key, "abc123");
        }
    }

    #[test]
    fn test_parse_rejects_unknown_verbs() {
        assert!(OrderAction::parse_token("reject_order_abc").is_err());
        assert!(OrderAction::parse_token("acceptorder_abc").is_err());
        assert!(OrderAction::parse_token("").is_err());
        assert!(OrderAction::parse_token("accept_order_").is_err());
        assert!(OrderAction::parse_token("hello world").is_err());
    }

    #[test]
    fn test_parse_keeps_key_untouched() {
        let (_, key) = OrderAction::parse_token("cancel_order_x_y_z").unwrap();
        assert_eq!(key, "x_y_z");
    }

    #[test]
    fn test_every_target_status_has_one_action() {
        assert_eq!(
            OrderAction::for_target(OrderStatus::Accepted),
            Some(OrderAction::Accept)
        );
        assert_eq!(
            OrderAction::for_target(OrderStatus::Cancelled),
            Some(OrderAction::Cancel)
        );
        assert_eq!(OrderAction::for_target(OrderStatus::Pending), None);
    }
}
