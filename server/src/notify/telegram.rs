//! Telegram delivery
//!
//! Outbound Bot API calls only; inbound webhook payloads are parsed in the
//! `telegram` module. Every call is wrapped in a timeout and mapped to
//! [`AppError::Upstream`] on failure so callers never hang on the platform.

use std::time::Duration;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    ChatId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, MessageId,
};

use super::{ContactMessage, Notifier, format};
use crate::db::models::{ChatMessage, Order};
use crate::utils::{AppError, AppResult};

/// Default per-request delivery timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Production notifier backed by the Telegram Bot API
pub struct TelegramNotifier {
    bot: Bot,
    /// Staff channel (or group) chat id
    staff_chat: ChatId,
    timeout: Duration,
}

impl TelegramNotifier {
    pub fn new(bot_token: &str, staff_chat_id: i64) -> Self {
        Self::with_timeout(bot_token, staff_chat_id, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(bot_token: &str, staff_chat_id: i64, timeout: Duration) -> Self {
        Self {
            bot: Bot::new(bot_token),
            staff_chat: ChatId(staff_chat_id),
            timeout,
        }
    }

    /// Run a Bot API request under the delivery timeout
    async fn deliver<T, F>(&self, what: &str, request: F) -> AppResult<T>
    where
        F: std::future::IntoFuture<Output = Result<T, teloxide::RequestError>>,
    {
        match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(AppError::upstream(format!("{what}: {e}"))),
            Err(_) => Err(AppError::upstream(format!("{what}: request timed out"))),
        }
    }

    fn keyboard(order: &Order) -> InlineKeyboardMarkup {
        let row: Vec<InlineKeyboardButton> = format::action_buttons(order)
            .into_iter()
            .map(|(label, token)| InlineKeyboardButton::callback(label, token))
            .collect();
        if row.is_empty() {
            InlineKeyboardMarkup::new(Vec::<Vec<InlineKeyboardButton>>::new())
        } else {
            InlineKeyboardMarkup::new(vec![row])
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn staff_new_order(&self, order: &Order) -> AppResult<Option<i32>> {
        let text = format::staff_order_text(order);
        let message = self
            .deliver(
                "staff order message",
                self.bot
                    .send_message(self.staff_chat, text)
                    .reply_markup(Self::keyboard(order)),
            )
            .await?;
        Ok(Some(message.id.0))
    }

    async fn staff_annotate_order(&self, order: &Order) -> AppResult<()> {
        let Some(message_id) = order.staff_message_id else {
            tracing::warn!(order = %order.id_string(), "No staff message to annotate");
            return Ok(());
        };
        let text = format::staff_order_text(order);
        self.deliver(
            "staff order annotation",
            self.bot
                .edit_message_text(self.staff_chat, MessageId(message_id), text)
                .reply_markup(Self::keyboard(order)),
        )
        .await?;
        Ok(())
    }

    async fn customer_status_changed(&self, order: &Order) -> AppResult<()> {
        let Some(customer) = &order.customer else {
            // Guest orders have no reachable identity
            return Ok(());
        };
        let text = format::customer_status_text(order);
        self.deliver(
            "customer status message",
            self.bot.send_message(ChatId(customer.telegram_id), text),
        )
        .await?;
        Ok(())
    }

    async fn relay_chat_to_staff(
        &self,
        message: &ChatMessage,
        display_name: Option<&str>,
    ) -> AppResult<()> {
        let text = format::chat_to_staff_text(message, display_name);
        self.deliver(
            "chat relay",
            self.bot.send_message(self.staff_chat, text),
        )
        .await?;
        Ok(())
    }

    async fn send_customer_text(&self, telegram_id: i64, text: &str) -> AppResult<()> {
        self.deliver(
            "customer message",
            self.bot.send_message(ChatId(telegram_id), text.to_string()),
        )
        .await?;
        Ok(())
    }

    async fn send_verification_code(&self, telegram_id: i64, code: &str) -> AppResult<()> {
        self.deliver(
            "verification code",
            self.bot
                .send_message(ChatId(telegram_id), format::verification_code_text(code)),
        )
        .await?;
        Ok(())
    }

    async fn relay_contact_form(&self, form: &ContactMessage) -> AppResult<()> {
        let text = format::contact_form_text(&form.name, &form.phone, &form.message);

        if let Some(image) = &form.image {
            let photo = InputFile::memory(image.clone()).file_name("attachment.jpg");
            let sent = self
                .deliver(
                    "contact form photo",
                    self.bot
                        .send_photo(self.staff_chat, photo)
                        .caption(text.clone()),
                )
                .await;
            match sent {
                Ok(_) => return Ok(()),
                Err(e) => {
                    // Oversized or rejected attachments degrade to text-only
                    tracing::warn!("Contact form photo delivery failed, sending text: {e}");
                }
            }
        }

        self.deliver(
            "contact form message",
            self.bot.send_message(self.staff_chat, text),
        )
        .await?;
        Ok(())
    }

    async fn ack_callback(&self, callback_query_id: &str) -> AppResult<()> {
        self.deliver(
            "callback ack",
            self.bot.answer_callback_query(callback_query_id.to_string()),
        )
        .await?;
        Ok(())
    }
}
