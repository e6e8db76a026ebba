//! Telegram webhook handler
//!
//! Always answers 200 with `{ok: ...}`: an error status would make
//! Telegram redeliver the same update, and a malformed or stale update
//! does not get better with retries.

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::telegram::{TelegramUpdate, WebhookReply};

/// POST /api/telegram/webhook
pub async fn webhook(
    State(state): State<ServerState>,
    Json(payload): Json<serde_json::Value>,
) -> Json<WebhookReply> {
    let update: TelegramUpdate = match serde_json::from_value(payload) {
        Ok(update) => update,
        Err(e) => {
            tracing::warn!("Unparseable webhook payload: {e}");
            return Json(WebhookReply {
                ok: false,
                detail: Some("unparseable update".into()),
            });
        }
    };

    match state.webhook.handle_update(update).await {
        Ok(handled) => {
            if let Some(order) = &handled.changed_order {
                state.broadcast_sync("order", "updated", &order.id_string(), Some(order));
            }
            Json(handled.reply)
        }
        Err(e) => {
            tracing::error!("Webhook handling failed: {e}");
            Json(WebhookReply {
                ok: false,
                detail: Some(e.to_string()),
            })
        }
    }
}
