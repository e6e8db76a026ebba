//! Inbound Telegram integration
//!
//! Action token parsing, webhook payload DTOs, and the update dispatcher.
//! Outbound delivery lives in `notify::telegram`.

pub mod action;
pub mod update;
pub mod webhook;

pub use action::OrderAction;
pub use update::TelegramUpdate;
pub use webhook::{HandledUpdate, WebhookReply, WebhookService};
