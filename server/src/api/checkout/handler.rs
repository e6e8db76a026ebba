//! Checkout handler

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{CustomerIdentity, OrderCreate, OrderItem};
use crate::utils::validate::validate_phone;
use crate::utils::{AppError, AppResult};

/// Customer identity as the storefront client sends it
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutUser {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// One cart line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutItem {
    /// Product id, `"product:key"` or bare key
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

/// POST /api/checkout body
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Absent for guest checkouts
    pub user: Option<CheckoutUser>,
    #[validate(custom(function = validate_phone))]
    pub phone_number: String,
    #[validate(length(min = 1, message = "cart cannot be empty"))]
    pub items: Vec<CheckoutItem>,
    pub total: f64,
    /// Client-side checkout time, informational only
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub success: bool,
    pub order_id: String,
    /// False when the order was saved but the staff notification failed
    pub notified: bool,
}

/// POST /api/checkout — place an order
pub async fn checkout(
    State(state): State<ServerState>,
    Json(request): Json<CheckoutRequest>,
) -> AppResult<Json<CheckoutResponse>> {
    request
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let data = OrderCreate {
        items: request
            .items
            .iter()
            .map(|item| OrderItem {
                product_id: item.id.clone(),
                name: item.name.clone(),
                unit_price: item.price,
                quantity: item.quantity,
            })
            .collect(),
        total_amount: request.total,
        phone_number: request.phone_number.clone(),
        customer: request.user.map(|u| CustomerIdentity {
            telegram_id: u.id,
            username: u.username,
            first_name: u.first_name,
            last_name: u.last_name,
        }),
    };

    let outcome = state.checkout.place_order(data).await?;
    let order = &outcome.order;

    state.broadcast_sync("order", "created", &order.id_string(), Some(order));
    for item in &order.items {
        // Stock changed; subscribed clients refetch the product
        state.broadcast_sync::<()>("product", "updated", &item.product_id, None);
    }

    Ok(Json(CheckoutResponse {
        success: true,
        order_id: order.id_string(),
        notified: outcome.notified,
    }))
}
