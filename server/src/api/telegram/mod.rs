//! Telegram webhook API module

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/telegram/webhook", post(handler::webhook))
}
