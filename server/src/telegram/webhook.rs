//! Webhook update handling
//!
//! Telegram redelivers any update that is not answered with HTTP 200, so
//! the rule here is: acknowledge everything that reached us, even when it
//! is malformed or refers to an order that no longer exists. Returning an
//! error status is reserved for infrastructure failures where a retry can
//! actually help.
//!
//! Two update kinds are acted on:
//! - callback queries carrying an action token -> status transition
//! - staff replies to a relayed chat message -> forwarded to the customer

use std::sync::Arc;

use serde::Serialize;

use super::action::OrderAction;
use super::update::{MessagePayload, TelegramUpdate};
use crate::db::repository::ChatRepository;
use crate::notify::{Notifier, format};
use crate::orders::TransitionService;
use crate::utils::{AppError, AppResult};

/// Webhook acknowledgement body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookReply {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl WebhookReply {
    fn handled() -> Self {
        Self {
            ok: true,
            detail: None,
        }
    }

    fn ignored(detail: impl Into<String>) -> Self {
        Self {
            ok: true,
            detail: Some(detail.into()),
        }
    }
}

/// Result of one update: the acknowledgement to send back, plus the order
/// whose status changed (for the client sync feed), if any
pub struct HandledUpdate {
    pub reply: WebhookReply,
    pub changed_order: Option<crate::db::models::Order>,
}

impl HandledUpdate {
    fn reply_only(reply: WebhookReply) -> Self {
        Self {
            reply,
            changed_order: None,
        }
    }
}

/// Inbound update dispatcher
pub struct WebhookService {
    transitions: Arc<TransitionService>,
    chat: ChatRepository,
    notifier: Arc<dyn Notifier>,
    /// Staff channel id; replies from any other chat are ignored
    staff_chat_id: Option<i64>,
}

impl WebhookService {
    pub fn new(
        transitions: Arc<TransitionService>,
        chat: ChatRepository,
        notifier: Arc<dyn Notifier>,
        staff_chat_id: Option<i64>,
    ) -> Self {
        Self {
            transitions,
            chat,
            notifier,
            staff_chat_id,
        }
    }

    /// Handle one delivered update
    pub async fn handle_update(&self, update: TelegramUpdate) -> AppResult<HandledUpdate> {
        if let Some(callback) = update.callback_query {
            let handled = self.handle_callback(callback.data.as_deref()).await?;
            if let Err(e) = self.notifier.ack_callback(&callback.id).await {
                tracing::debug!("Callback ack failed: {e}");
            }
            return Ok(handled);
        }

        if let Some(message) = update.message {
            let reply = self.handle_message(message).await?;
            return Ok(HandledUpdate::reply_only(reply));
        }

        Ok(HandledUpdate::reply_only(WebhookReply::ignored(
            "unsupported update kind",
        )))
    }

    /// Act on a tapped inline button
    async fn handle_callback(&self, data: Option<&str>) -> AppResult<HandledUpdate> {
        let Some(token) = data else {
            return Ok(HandledUpdate::reply_only(WebhookReply::ignored(
                "callback without data",
            )));
        };

        let (action, order_key) = match OrderAction::parse_token(token) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("{e}");
                return Ok(HandledUpdate::reply_only(WebhookReply::ignored(
                    "unrecognized action token",
                )));
            }
        };

        match self.transitions.apply(&order_key, action.target_status()).await {
            Ok(outcome) if outcome.changed() => Ok(HandledUpdate {
                reply: WebhookReply::handled(),
                changed_order: Some(outcome.order().clone()),
            }),
            Ok(_) => Ok(HandledUpdate::reply_only(WebhookReply::ignored(
                "transition already applied",
            ))),
            // A stale button or a double-tap after a terminal transition is
            // normal operation, not a delivery failure worth a retry.
            Err(AppError::NotFound { .. }) => {
                tracing::warn!(order = order_key, "Action for unknown order");
                Ok(HandledUpdate::reply_only(WebhookReply::ignored(
                    "order not found",
                )))
            }
            Err(AppError::Conflict { message }) => {
                tracing::warn!(order = order_key, "{message}");
                Ok(HandledUpdate::reply_only(WebhookReply::ignored(message)))
            }
            Err(e) => Err(e),
        }
    }

    /// Route a staff channel reply back to the customer it quotes
    async fn handle_message(&self, message: MessagePayload) -> AppResult<WebhookReply> {
        let Some(staff_chat_id) = self.staff_chat_id else {
            return Ok(WebhookReply::ignored("no staff channel configured"));
        };
        if message.chat.id != staff_chat_id {
            return Ok(WebhookReply::ignored("message outside staff channel"));
        }
        if message.from.as_ref().is_some_and(|u| u.is_bot) {
            return Ok(WebhookReply::ignored("bot message"));
        }

        let Some(text) = message.text.filter(|t| !t.trim().is_empty()) else {
            return Ok(WebhookReply::ignored("empty message"));
        };
        let customer_id = message
            .reply_to_message
            .as_ref()
            .and_then(|quoted| quoted.text.as_deref())
            .and_then(format::extract_customer_id);
        let Some(customer_id) = customer_id else {
            return Ok(WebhookReply::ignored("reply does not quote a customer message"));
        };

        self.chat.append(customer_id, text.clone(), true, None).await?;
        tracing::info!(customer = customer_id, "Staff reply recorded");

        if let Err(e) = self.notifier.send_customer_text(customer_id, &text).await {
            tracing::warn!(customer = customer_id, "Reply delivery failed: {e}");
        }

        Ok(WebhookReply::handled())
    }
}
