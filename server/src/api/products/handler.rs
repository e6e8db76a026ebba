//! Product API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::utils::{AppError, AppResponse, AppResult};

const RESOURCE_PRODUCT: &str = "product";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Include hidden products (back office)
    #[serde(default)]
    pub all: bool,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    100
}

/// GET /api/products — storefront listing (visible only) or, with
/// `?all=true`, the full back-office catalog
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<AppResponse<Vec<Product>>>> {
    let products = if query.all {
        state.products.find_all(query.limit, query.offset).await?
    } else {
        state
            .products
            .find_visible(query.limit, query.offset)
            .await?
    };
    Ok(Json(AppResponse::success(products)))
}

/// GET /api/products/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Product>>> {
    let product = state
        .products
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {id}")))?;
    Ok(Json(AppResponse::success(product)))
}

/// POST /api/products — create
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<ProductCreate>,
) -> AppResult<Json<AppResponse<Product>>> {
    let product = state.products.create(data).await?;
    state.broadcast_sync(RESOURCE_PRODUCT, "created", &product.id_string(), Some(&product));
    Ok(Json(AppResponse::success(product)))
}

/// PUT /api/products/:id — update descriptive fields
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<ProductUpdate>,
) -> AppResult<Json<AppResponse<Product>>> {
    let product = state.products.update(&id, data).await?;
    state.broadcast_sync(RESOURCE_PRODUCT, "updated", &product.id_string(), Some(&product));
    Ok(Json(AppResponse::success(product)))
}

#[derive(Debug, Deserialize)]
pub struct AdjustRequest {
    /// Signed stock delta from the staff +/- controls
    pub delta: i64,
}

/// POST /api/products/:id/adjust — manual stock adjustment
pub async fn adjust(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(request): Json<AdjustRequest>,
) -> AppResult<Json<AppResponse<Product>>> {
    let product = state.products.adjust(&id, request.delta).await?;
    state.broadcast_sync(RESOURCE_PRODUCT, "updated", &product.id_string(), Some(&product));
    Ok(Json(AppResponse::success(product)))
}
