//! Inbound webhook payloads
//!
//! Hand-rolled DTOs for the handful of Telegram update fields the webhook
//! handler actually reads. Telegram sends far more than this; serde drops
//! the rest, so new Bot API fields never break deserialization.

use serde::Deserialize;

/// One update delivered by Telegram to the webhook endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramUpdate {
    #[serde(default)]
    pub update_id: i64,
    /// Present when a staff member tapped an inline button
    #[serde(default)]
    pub callback_query: Option<CallbackQueryPayload>,
    /// Present for plain messages, including staff channel replies
    #[serde(default)]
    pub message: Option<MessagePayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQueryPayload {
    pub id: String,
    /// The callback token from the tapped button
    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagePayload {
    #[serde(default)]
    pub text: Option<String>,
    pub chat: ChatPayload,
    #[serde(default)]
    pub from: Option<UserPayload>,
    /// The quoted message when this message is a reply
    #[serde(default)]
    pub reply_to_message: Option<Box<MessagePayload>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatPayload {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}
