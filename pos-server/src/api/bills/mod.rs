//! Bill API module

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/bills", bill_routes())
        .route("/api/transactions", get(handler::transactions))
}

fn bill_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/today/totals", get(handler::today_totals))
        .route("/{bill_number}", get(handler::get_by_number))
}
