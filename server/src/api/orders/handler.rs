//! Order API handlers
//!
//! Staff-facing views over the order store. Status changes go through the
//! same transition service as the webhook buttons, so the status machine
//! and customer notifications apply identically.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{Order, OrderFilter, OrderSortKey, SortDirection};
use crate::orders::OrderStatus;
use crate::utils::{AppError, AppResponse, AppResult};

/// GET /api/orders query parameters
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub status: Option<OrderStatus>,
    /// Free-text match against id, phone, customer handle
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub sort: OrderSortKey,
    #[serde(default)]
    pub dir: SortDirection,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// GET /api/orders — filtered, sorted page of orders
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Vec<Order>>>> {
    let filter = OrderFilter {
        status: query.status,
        query: query.q.filter(|q| !q.trim().is_empty()),
    };
    let orders = state
        .orders
        .find_all(&filter, query.sort, query.dir, query.limit, query.offset)
        .await?;
    Ok(Json(AppResponse::success(orders)))
}

/// GET /api/orders/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Order>>> {
    let order = state
        .orders
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {id}")))?;
    Ok(Json(AppResponse::success(order)))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: OrderStatus,
}

/// POST /api/orders/:id/status — manual staff transition
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(request): Json<StatusUpdateRequest>,
) -> AppResult<Json<AppResponse<Order>>> {
    let outcome = state.transitions.apply(&id, request.status).await?;
    if outcome.changed() {
        state.broadcast_sync(
            "order",
            "updated",
            &outcome.order().id_string(),
            Some(outcome.order()),
        );
    }
    Ok(Json(AppResponse::success(outcome.order().clone())))
}
