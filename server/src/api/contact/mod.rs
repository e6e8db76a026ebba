//! Contact form API module

mod handler;

use axum::{Router, extract::DefaultBodyLimit, routing::post};

use crate::core::ServerState;

/// Body limit sized for the 10 MB image plus base64 overhead
const CONTACT_BODY_LIMIT: usize = 15 * 1024 * 1024;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/contact", post(handler::submit))
        .layer(DefaultBodyLimit::max(CONTACT_BODY_LIMIT))
}
