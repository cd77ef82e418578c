//! Health check endpoints

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use tracing::warn;

use crate::AppState;

#[derive(Debug, Serialize, PartialEq)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ReadyResponse {
    pub ready: bool,
    pub catalog: bool,
}

/// Health check - always returns OK if the server is running
async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness check - the catalog store must answer a round trip
async fn readyz(State(state): State<AppState>) -> Json<ReadyResponse> {
    let catalog_ok = match state.catalog.health_check().await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "Catalog store is not ready");
            false
        }
    };

    Json(ReadyResponse {
        ready: catalog_ok,
        catalog: catalog_ok,
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
