use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use super::ApiError;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub database: bool,
}

/// GET /system/status
/// Liveness check: reports the crate version and whether the database
/// answers a ping.
pub async fn get_status(
    State(state): State<Arc<SharedState>>,
) -> Result<Json<SystemStatus>, ApiError> {
    let database = state.store.ping().await.is_ok();

    Ok(Json(SystemStatus {
        status: if database { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database,
    }))
}
