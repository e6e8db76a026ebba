//! Notification dispatcher
//!
//! Everything that leaves the server toward Telegram goes through the
//! [`Notifier`] trait: the staff channel message for a new order, in-place
//! status annotations, customer status pushes, chat relay, verification
//! codes, and contact form forwarding.
//!
//! Delivery failures are surfaced as [`AppError::Upstream`] and never roll
//! back persisted state; callers log and move on.

pub mod format;
pub mod telegram;

pub use telegram::TelegramNotifier;

use async_trait::async_trait;

use crate::db::models::{ChatMessage, Order};
use crate::utils::{AppError, AppResult};

/// Contact form submission forwarded to the staff channel
#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub name: String,
    pub phone: String,
    pub message: String,
    /// Decoded image attachment, if any
    pub image: Option<Vec<u8>>,
}

/// Outbound messaging seam
///
/// Implementations: [`TelegramNotifier`] in production, [`DisabledNotifier`]
/// when credentials are absent, and a recording fake in the test suite.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Post the new-order message with action buttons to the staff channel
    ///
    /// Returns the platform message id so the order can remember which
    /// message to annotate on later transitions.
    async fn staff_new_order(&self, order: &Order) -> AppResult<Option<i32>>;

    /// Re-render the staff message for the order's current status
    ///
    /// No-op when the order has no recorded staff message.
    async fn staff_annotate_order(&self, order: &Order) -> AppResult<()>;

    /// Push a status change to the customer
    ///
    /// Guest orders have no reachable identity; implementations must treat
    /// them as a silent no-op, not an error.
    async fn customer_status_changed(&self, order: &Order) -> AppResult<()>;

    /// Relay a customer chat message into the staff channel
    async fn relay_chat_to_staff(
        &self,
        message: &ChatMessage,
        display_name: Option<&str>,
    ) -> AppResult<()>;

    /// Send free-form text to a customer (manager chat replies)
    async fn send_customer_text(&self, telegram_id: i64, text: &str) -> AppResult<()>;

    /// Send a login verification code to a customer
    async fn send_verification_code(&self, telegram_id: i64, code: &str) -> AppResult<()>;

    /// Forward a contact form submission to the staff channel
    async fn relay_contact_form(&self, form: &ContactMessage) -> AppResult<()>;

    /// Acknowledge a callback query so the client stops its spinner
    async fn ack_callback(&self, callback_query_id: &str) -> AppResult<()>;
}

/// Notifier used when Telegram credentials are not configured
///
/// The server still starts and serves everything that does not need
/// messaging; operations that do need it fail with a configuration error.
pub struct DisabledNotifier;

impl DisabledNotifier {
    fn unavailable() -> AppError {
        AppError::configuration("Telegram credentials not configured")
    }
}

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn staff_new_order(&self, _order: &Order) -> AppResult<Option<i32>> {
        Err(Self::unavailable())
    }

    async fn staff_annotate_order(&self, _order: &Order) -> AppResult<()> {
        Err(Self::unavailable())
    }

    async fn customer_status_changed(&self, order: &Order) -> AppResult<()> {
        if order.customer.is_none() {
            return Ok(());
        }
        Err(Self::unavailable())
    }

    async fn relay_chat_to_staff(
        &self,
        _message: &ChatMessage,
        _display_name: Option<&str>,
    ) -> AppResult<()> {
        Err(Self::unavailable())
    }

    async fn send_customer_text(&self, _telegram_id: i64, _text: &str) -> AppResult<()> {
        Err(Self::unavailable())
    }

    async fn send_verification_code(&self, _telegram_id: i64, _code: &str) -> AppResult<()> {
        Err(Self::unavailable())
    }

    async fn relay_contact_form(&self, _form: &ContactMessage) -> AppResult<()> {
        Err(Self::unavailable())
    }

    async fn ack_callback(&self, _callback_query_id: &str) -> AppResult<()> {
        Ok(())
    }
}
