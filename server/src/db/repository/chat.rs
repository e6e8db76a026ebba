//! Chat message repository (append-only)

use super::{BaseRepository, RepoError, RepoResult, make_thing};
use crate::db::models::ChatMessage;
use crate::utils::time::now_rfc3339;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const CHAT_TABLE: &str = "chat_message";

#[derive(Clone)]
pub struct ChatRepository {
    base: BaseRepository,
}

impl ChatRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Append one message to a customer's thread
    pub async fn append(
        &self,
        telegram_user_id: i64,
        message: String,
        is_from_manager: bool,
        order_id: Option<&str>,
    ) -> RepoResult<ChatMessage> {
        if message.trim().is_empty() {
            return Err(RepoError::Validation("message cannot be empty".into()));
        }

        let record = ChatMessage {
            id: None,
            telegram_user_id,
            order_id: order_id.map(|id| make_thing("order", id)),
            message,
            is_from_manager,
            created_at: now_rfc3339(),
        };

        let created: Option<ChatMessage> =
            self.base.db().create(CHAT_TABLE).content(record).await?;
        created.ok_or_else(|| RepoError::Database("Failed to store chat message".into()))
    }

    /// Ordered history for one customer, optionally narrowed to one order
    pub async fn history(
        &self,
        telegram_user_id: i64,
        order_id: Option<&str>,
    ) -> RepoResult<Vec<ChatMessage>> {
        let mut sql =
            format!("SELECT * FROM {CHAT_TABLE} WHERE telegram_user_id = $user_id");
        if order_id.is_some() {
            sql.push_str(" AND order_id = $order_id");
        }
        sql.push_str(" ORDER BY created_at ASC");

        let mut query = self
            .base
            .db()
            .query(sql)
            .bind(("user_id", telegram_user_id));
        if let Some(id) = order_id {
            query = query.bind(("order_id", make_thing("order", id)));
        }

        let messages: Vec<ChatMessage> = query.await?.take(0)?;
        Ok(messages)
    }
}
