//! Chat API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/chat", chat_routes())
}

fn chat_routes() -> Router<ServerState> {
    Router::new()
        .route("/messages", post(handler::send_message))
        .route("/messages/{user_id}", get(handler::get_messages))
}
