//! Label API module

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/labels", label_routes())
}

fn label_routes() -> Router<ServerState> {
    Router::new()
        .route("/preview", get(handler::preview))
        .route("/print", post(handler::print))
}
