//! Lavka storefront server
//!
//! Backend for a small retail storefront: order lifecycle, stock-safe
//! checkout, and Telegram-based staff/customer notifications.
//!
//! # Module structure
//!
//! ```text
//! server/src/
//! ├── core/       # Config, shared state, HTTP server
//! ├── api/        # HTTP routes and handlers, per resource
//! ├── db/         # Embedded SurrealDB, models, repositories
//! ├── orders/     # Status machine, checkout saga, transitions
//! ├── notify/     # Outbound notification dispatcher (Telegram)
//! ├── telegram/   # Inbound webhook updates and action tokens
//! ├── message/    # Client sync bus (WebSocket fan-out)
//! └── utils/      # Errors, logging, timestamps, validators
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod message;
pub mod notify;
pub mod orders;
pub mod telegram;
pub mod utils;

pub use crate::core::{Config, Server, ServerState, TelegramConfig};
pub use message::{BusMessage, EventType, MessageBus, SyncPayload};
pub use orders::{OrderStatus, TransitionError};
pub use utils::logger::{init_logger, init_logger_with_file};
pub use utils::{AppError, AppResponse, AppResult};
