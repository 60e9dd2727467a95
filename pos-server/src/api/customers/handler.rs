//! Customer API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::common::validation::{MAX_NAME_LEN, MAX_TEXT_LEN, validate_required_text};
use crate::core::ServerState;
use crate::db::repository::customer;
use crate::{AppError, AppResult};
use shared::models::{Customer, CustomerUpsert};

/// GET /api/customers/:mobile
pub async fn get_by_mobile(
    State(state): State<ServerState>,
    Path(mobile): Path<String>,
) -> AppResult<Json<Customer>> {
    let found = customer::get(&state.pool, &mobile)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {} not found", mobile)))?;
    Ok(Json(found))
}

/// POST /api/customers - create or update by mobile
pub async fn upsert(
    State(state): State<ServerState>,
    Json(payload): Json<CustomerUpsert>,
) -> AppResult<Json<Customer>> {
    validate_required_text(&payload.mobile, "mobile", 20)?;
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    if payload.address.chars().count() > MAX_TEXT_LEN {
        return Err(AppError::validation("address too long"));
    }

    let saved = customer::upsert(&state.pool, payload).await?;
    Ok(Json(saved))
}
