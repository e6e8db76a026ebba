//! Chat API handlers
//!
//! Customer-to-staff messaging. Persist first, then relay: the durable
//! copy is the source of truth and a Telegram outage only degrades
//! delivery, never loses history.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::ChatMessage;
use crate::utils::{AppResponse, AppResult};

/// POST /api/chat/messages body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub telegram_user_id: i64,
    pub message: String,
    /// Optional link to the order the message is about
    #[serde(default)]
    pub order_id: Option<String>,
    /// Customer display name for the staff channel
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub message: ChatMessage,
    /// False when the message was stored but the staff relay failed
    pub relayed: bool,
}

/// POST /api/chat/messages — persist a customer message and relay it
pub async fn send_message(
    State(state): State<ServerState>,
    Json(request): Json<SendMessageRequest>,
) -> AppResult<Json<AppResponse<SendMessageResponse>>> {
    let stored = state
        .chat
        .append(
            request.telegram_user_id,
            request.message,
            false,
            request.order_id.as_deref(),
        )
        .await?;

    let relayed = match state
        .notifier
        .relay_chat_to_staff(&stored, request.display_name.as_deref())
        .await
    {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(customer = stored.telegram_user_id, "Chat relay failed: {e}");
            false
        }
    };

    Ok(Json(AppResponse::success(SendMessageResponse {
        message: stored,
        relayed,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    #[serde(default)]
    pub order_id: Option<String>,
}

/// GET /api/chat/messages/:user_id — ordered history for one customer
pub async fn get_messages(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<AppResponse<Vec<ChatMessage>>>> {
    let messages = state
        .chat
        .history(user_id, query.order_id.as_deref())
        .await?;
    Ok(Json(AppResponse::success(messages)))
}
