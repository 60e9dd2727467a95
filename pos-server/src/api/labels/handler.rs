//! Label API Handlers
//!
//! `preview` renders a single label as PNG for on-screen inspection;
//! `print` composes a full sheet and spools it. Both accept either a
//! stored product barcode or ad-hoc field values, matching how the till
//! is used for unregistered stock.

use std::io::Cursor;

use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use image::{DynamicImage, ImageFormat, RgbImage};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::ServerState;
use crate::db::repository::product;
use crate::{AppError, AppResult};
use pos_layout::{LabelComposer, LabelItem};
use shared::models::Product;

#[derive(Debug, Deserialize)]
pub struct PreviewParams {
    /// Stored product lookup; when unset, the ad-hoc fields below apply
    pub barcode: Option<String>,
    pub store: Option<String>,

    pub code: Option<String>,
    pub name: Option<String>,
    pub measure: Option<String>,
    pub quantity: Option<f64>,
    pub mrp: Option<f64>,
    pub retail_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct PrintRequest {
    pub barcode: String,
    #[serde(default = "default_count")]
    pub count: u32,
    pub store_name: Option<String>,
}

fn default_count() -> u32 {
    1
}

#[derive(Debug, Serialize)]
pub struct PrintResponse {
    pub ok: bool,
    pub printed: u32,
    pub errors: Vec<String>,
}

fn money(v: f64) -> Decimal {
    Decimal::from_f64_retain(v).unwrap_or_default()
}

fn label_item_from_product(p: &Product) -> LabelItem {
    LabelItem {
        barcode: p.barcode.clone(),
        name: p.name.clone(),
        measure: p.measure.clone(),
        quantity: money(p.quantity),
        mrp: money(p.mrp),
        retail_price: money(p.retail_price),
    }
}

fn label_item_from_params(params: &PreviewParams) -> LabelItem {
    LabelItem {
        barcode: params
            .code
            .clone()
            .unwrap_or_else(|| "0000000000000".to_string()),
        name: params.name.clone().unwrap_or_else(|| "Sample".to_string()),
        measure: params.measure.clone().unwrap_or_else(|| "KG".to_string()),
        quantity: money(params.quantity.unwrap_or(1.0)),
        mrp: money(params.mrp.unwrap_or(0.0)),
        retail_price: money(params.retail_price.unwrap_or(0.0)),
    }
}

fn png_response(img: RgbImage) -> AppResult<Response> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| AppError::internal(format!("PNG encoding failed: {e}")))?;

    Ok(([(header::CONTENT_TYPE, "image/png")], buf).into_response())
}

/// GET /api/labels/preview - one label as PNG
pub async fn preview(
    State(state): State<ServerState>,
    Query(params): Query<PreviewParams>,
) -> AppResult<Response> {
    let item = match params.barcode.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
        Some(barcode) => {
            let found = product::get(&state.pool, barcode)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Product {} not found", barcode)))?;
            label_item_from_product(&found)
        }
        None => label_item_from_params(&params),
    };

    let store = params
        .store
        .clone()
        .unwrap_or_else(|| state.config.store.name.clone());

    let composer = LabelComposer::new(state.config.label_spec(), &state.config.render_config());
    let label = composer.compose_label(&item, &store)?;
    png_response(label)
}

/// POST /api/labels/print - compose a sheet and spool it
pub async fn print(
    State(state): State<ServerState>,
    Json(payload): Json<PrintRequest>,
) -> AppResult<(StatusCode, Json<PrintResponse>)> {
    let barcode = payload.barcode.trim();
    if barcode.is_empty() {
        return Err(AppError::validation("barcode is required"));
    }
    if payload.count == 0 {
        return Err(AppError::validation("count must be at least 1"));
    }

    let found = product::get(&state.pool, barcode)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", barcode)))?;

    let store = payload
        .store_name
        .clone()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| state.config.store.name.clone());

    let composer = LabelComposer::new(state.config.label_spec(), &state.config.render_config());
    let sheet = composer.compose_sheet(
        &label_item_from_product(&found),
        &store,
        payload.count,
        state.config.labels_per_row,
    )?;

    // The sheet is fully composed; delivery may still fail on its own
    match state.printing.print_label_sheet(&sheet).await {
        Ok(()) => {
            info!(barcode = %found.barcode, count = payload.count, "label sheet printed");
            Ok((
                StatusCode::OK,
                Json(PrintResponse {
                    ok: true,
                    printed: payload.count,
                    errors: Vec::new(),
                }),
            ))
        }
        Err(e) => {
            let available = state.printing.available_printers();
            warn!(error = %e, available = ?available, "label print failed");
            Ok((
                StatusCode::BAD_GATEWAY,
                Json(PrintResponse {
                    ok: false,
                    printed: 0,
                    errors: vec![format!(
                        "{} | Available printers: {}",
                        e,
                        available.join(", ")
                    )],
                }),
            ))
        }
    }
}
