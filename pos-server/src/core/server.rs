//! HTTP server assembly

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::{Config, ServerState};
use crate::api;

pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    /// Compose the full application router.
    pub fn router(state: ServerState) -> Router {
        Router::new()
            .merge(api::health::router())
            .merge(api::products::router())
            .merge(api::customers::router())
            .merge(api::bills::router())
            .merge(api::labels::router())
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let app = Self::router(self.state);
        let addr = format!("0.0.0.0:{}", self.config.http_port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!(addr = %addr, "POS server listening");
        axum::serve(listener, app).await?;
        Ok(())
    }
}
