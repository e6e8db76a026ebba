//! HTTP API
//!
//! One module per resource, each exporting a `router()` nested under its
//! `/api/...` prefix. `build_router` merges them; middleware and state are
//! applied in `core::server`.

pub mod auth;
pub mod chat;
pub mod checkout;
pub mod contact;
pub mod events;
pub mod health;
pub mod orders;
pub mod products;
pub mod telegram;

use axum::Router;

use crate::core::ServerState;

/// All routes, no middleware, no state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(checkout::router())
        .merge(orders::router())
        .merge(products::router())
        .merge(chat::router())
        .merge(auth::router())
        .merge(contact::router())
        .merge(telegram::router())
        .merge(events::router())
        .merge(health::router())
}
