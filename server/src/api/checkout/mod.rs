//! Checkout API module

mod handler;

pub use handler::{CheckoutItem, CheckoutRequest, CheckoutResponse, CheckoutUser};

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/checkout", post(handler::checkout))
}
