//! Health API Handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::AppResult;
use crate::core::ServerState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    /// None when no network receipt printer is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_printer_online: Option<bool>,
}

/// GET /api/health - liveness plus printer reachability
pub async fn health(State(state): State<ServerState>) -> AppResult<Json<HealthResponse>> {
    let database = sqlx::query("SELECT 1")
        .execute(&state.pool)
        .await
        .is_ok();

    let receipt_printer_online = state.printing.receipt_printer_online().await;

    Ok(Json(HealthResponse {
        status: "ok",
        database,
        receipt_printer_online,
    }))
}
