//! Chat message model

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::record_link;

/// One message in the customer/manager chat history (append-only)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(
        default,
        with = "record_link::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<Thing>,
    /// Telegram user id of the customer this thread belongs to
    pub telegram_user_id: i64,
    /// Optional link to the order this message is about
    #[serde(
        default,
        with = "record_link::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub order_id: Option<Thing>,
    pub message: String,
    pub is_from_manager: bool,
    /// RFC3339 timestamp
    pub created_at: String,
}
