//! Status transitions
//!
//! The only write path for `Order.status`. Every source of a transition
//! (staff callback buttons, the back-office API) funnels through
//! [`TransitionService::apply`], which checks the status machine, persists
//! the new status, and fans out notifications.
//!
//! Re-applying a transition the order is already in (staff double-tapping a
//! button, Telegram redelivering an update) is a no-op that sends nothing.

use std::sync::Arc;

use crate::db::models::Order;
use crate::db::repository::OrderRepository;
use crate::notify::Notifier;
use crate::orders::OrderStatus;
use crate::utils::{AppError, AppResult};

/// What a requested transition did
#[derive(Debug, Clone)]
pub enum TransitionOutcome {
    /// Status changed; notifications were dispatched
    Applied(Order),
    /// Order was already in the requested status; nothing was sent
    AlreadyApplied(Order),
}

impl TransitionOutcome {
    pub fn order(&self) -> &Order {
        match self {
            Self::Applied(order) | Self::AlreadyApplied(order) => order,
        }
    }

    pub fn changed(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Status transition orchestration
pub struct TransitionService {
    orders: OrderRepository,
    notifier: Arc<dyn Notifier>,
}

impl TransitionService {
    pub fn new(orders: OrderRepository, notifier: Arc<dyn Notifier>) -> Self {
        Self { orders, notifier }
    }

    /// Apply a transition to the target status
    ///
    /// Illegal transitions (including anything out of a terminal status)
    /// fail with a conflict; the stored order is untouched. Notification
    /// failures are logged and never roll the transition back.
    pub async fn apply(&self, order_id: &str, target: OrderStatus) -> AppResult<TransitionOutcome> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {order_id}")))?;

        if order.status == target {
            tracing::debug!(order = %order.id_string(), status = %target, "Transition already applied");
            return Ok(TransitionOutcome::AlreadyApplied(order));
        }

        order
            .status
            .transition_to(target)
            .map_err(|e| AppError::conflict(e.to_string()))?;

        // The write is guarded on the status we validated against; if
        // another transition landed in between, this matches nothing and the
        // order stays as the winner left it.
        let updated = self
            .orders
            .update_status(order_id, order.status, target)
            .await?
            .ok_or_else(|| {
                AppError::conflict(format!(
                    "Order {order_id} was changed concurrently; transition to {target} not applied"
                ))
            })?;
        tracing::info!(
            order = %updated.id_string(),
            from = %order.status,
            to = %target,
            "Order status changed"
        );

        if let Err(e) = self.notifier.customer_status_changed(&updated).await {
            tracing::warn!(order = %updated.id_string(), "Customer notification failed: {e}");
        }
        if let Err(e) = self.notifier.staff_annotate_order(&updated).await {
            tracing::warn!(order = %updated.id_string(), "Staff annotation failed: {e}");
        }

        Ok(TransitionOutcome::Applied(updated))
    }
}
