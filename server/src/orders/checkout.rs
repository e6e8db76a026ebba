//! Checkout
//!
//! Placing an order is a small saga over per-item stock decrements:
//!
//! 1. take stock for each line item with a conditional decrement,
//! 2. on the first shortage, put back everything already taken and fail
//!    the whole order,
//! 3. persist the order as `pending`,
//! 4. post the staff notification and remember its message id.
//!
//! Step 4 is best-effort: a Telegram outage never rolls back a placed
//! order, the response just reports `notified: false`.

use std::sync::Arc;

use crate::db::models::{Order, OrderCreate};
use crate::db::repository::{OrderRepository, ProductRepository};
use crate::message::{BusMessage, MessageBus};
use crate::notify::Notifier;
use crate::utils::{AppError, AppResult};

/// Result of a placed order
#[derive(Debug, Clone)]
pub struct CheckoutOutcome {
    pub order: Order,
    /// Whether the staff notification was delivered
    pub notified: bool,
}

/// Checkout orchestration over stock and the order store
pub struct CheckoutService {
    orders: OrderRepository,
    products: ProductRepository,
    notifier: Arc<dyn Notifier>,
    bus: Arc<MessageBus>,
}

impl CheckoutService {
    pub fn new(
        orders: OrderRepository,
        products: ProductRepository,
        notifier: Arc<dyn Notifier>,
        bus: Arc<MessageBus>,
    ) -> Self {
        Self {
            orders,
            products,
            notifier,
            bus,
        }
    }

    /// Place an order: reserve stock, persist, notify staff
    pub async fn place_order(&self, data: OrderCreate) -> AppResult<CheckoutOutcome> {
        if data.items.is_empty() {
            return Err(AppError::validation("items cannot be empty"));
        }
        if data.items.iter().any(|i| i.quantity <= 0) {
            return Err(AppError::validation("item quantities must be positive"));
        }

        // Reserve stock item by item; remember what was taken so a shortage
        // further down the cart can be compensated.
        let mut taken: Vec<(String, i64)> = Vec::with_capacity(data.items.len());
        let mut depleted: Vec<String> = Vec::new();
        for item in &data.items {
            match self.products.try_decrement(&item.product_id, item.quantity).await {
                Ok(Some(product)) => {
                    if product.quantity == 0 {
                        depleted.push(product.name);
                    }
                    taken.push((item.product_id.clone(), item.quantity));
                }
                Ok(None) => {
                    self.release(&taken).await;
                    return Err(AppError::validation(format!(
                        "insufficient stock for {}",
                        item.name
                    )));
                }
                Err(e) => {
                    self.release(&taken).await;
                    return Err(e.into());
                }
            }
        }

        let mut order = match self.orders.create(data).await {
            Ok(order) => order,
            Err(e) => {
                self.release(&taken).await;
                return Err(e.into());
            }
        };

        // Only announce depletion once the order actually holds the stock;
        // a compensated shortage above never reaches this point.
        for name in &depleted {
            let _ = self.bus.publish(BusMessage::notification(
                "Out of stock",
                &format!("{name} is out of stock"),
            ));
        }

        let notified = match self.notifier.staff_new_order(&order).await {
            Ok(Some(message_id)) => {
                match self.orders.set_staff_message(&order.key(), message_id).await {
                    Ok(updated) => order = updated,
                    Err(e) => {
                        tracing::warn!(order = %order.id_string(), "Failed to record staff message id: {e}");
                    }
                }
                true
            }
            Ok(None) => true,
            Err(e) => {
                tracing::warn!(order = %order.id_string(), "Staff notification failed: {e}");
                false
            }
        };

        Ok(CheckoutOutcome { order, notified })
    }

    /// Put back stock taken before a failed checkout
    async fn release(&self, taken: &[(String, i64)]) {
        for (product_id, amount) in taken {
            if let Err(e) = self.products.increment(product_id, *amount).await {
                tracing::error!(product = %product_id, amount, "Stock compensation failed: {e}");
            }
        }
    }
}
