//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::info;

use crate::common::validation::{MAX_NAME_LEN, validate_non_negative, validate_required_text};
use crate::core::ServerState;
use crate::db::repository::product;
use crate::{AppError, AppResult};
use shared::models::{Product, ProductCreate, ProductUpdate};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Substring match against English or Tamil name
    pub q: Option<String>,
    pub limit: Option<i64>,
}

fn validate_create(payload: &ProductCreate) -> AppResult<()> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.measure, "measure", MAX_NAME_LEN)?;
    validate_non_negative(payload.quantity, "quantity")?;
    validate_non_negative(payload.mrp, "mrp")?;
    validate_non_negative(payload.retail_price, "retail_price")?;
    Ok(())
}

/// GET /api/products - list the catalog, optionally filtered by `q`
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Product>>> {
    let products = match params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => product::search(&state.pool, q, params.limit.unwrap_or(20)).await?,
        None => product::list(&state.pool).await?,
    };
    Ok(Json(products))
}

/// GET /api/products/:barcode
pub async fn get_by_barcode(
    State(state): State<ServerState>,
    Path(barcode): Path<String>,
) -> AppResult<Json<Product>> {
    let found = product::get(&state.pool, &barcode)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", barcode)))?;
    Ok(Json(found))
}

/// POST /api/products - create with a server-generated barcode id
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    validate_create(&payload)?;

    let created = product::create(&state.pool, payload).await?;
    info!(barcode = %created.barcode, name = %created.name, "product created");
    Ok(Json(created))
}

/// PUT /api/products/:barcode
pub async fn update(
    State(state): State<ServerState>,
    Path(barcode): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(mrp) = payload.mrp {
        validate_non_negative(mrp, "mrp")?;
    }
    if let Some(rp) = payload.retail_price {
        validate_non_negative(rp, "retail_price")?;
    }

    let updated = product::update(&state.pool, &barcode, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/products/:barcode
pub async fn delete(
    State(state): State<ServerState>,
    Path(barcode): Path<String>,
) -> AppResult<Json<bool>> {
    let removed = product::delete(&state.pool, &barcode).await?;
    if removed {
        info!(barcode = %barcode, "product deleted");
    }
    Ok(Json(removed))
}
