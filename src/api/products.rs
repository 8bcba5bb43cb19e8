use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_sessions::Session;

use super::ApiError;
use super::validation::require_field;
use crate::services::{ProductQuery, ProductResult};
use crate::state::SharedState;

/// Session key holding the last-searched vehicle attributes blob.
const LAST_SEARCH_KEY: &str = "last_vehicle_search";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSearchRequest {
    pub vehicle_type: Option<String>,
    pub year: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub mileage: Option<String>,
    pub part_search: Option<String>,
}

/// POST /products/search
/// The recommendation path never surfaces upstream errors: a failed or
/// malformed completion reply yields the deterministic fallback results.
pub async fn search_products(
    State(state): State<Arc<SharedState>>,
    session: Session,
    Json(payload): Json<ProductSearchRequest>,
) -> Result<Json<Vec<ProductResult>>, ApiError> {
    let vehicle_type = require_field(payload.vehicle_type.as_deref(), "vehicleType")?;
    let year = require_field(payload.year.as_deref(), "year")?;
    let make = require_field(payload.make.as_deref(), "make")?;
    let model = require_field(payload.model.as_deref(), "model")?;
    let part_search = require_field(payload.part_search.as_deref(), "partSearch")?;
    let mileage = payload.mileage.unwrap_or_default();

    // Remember the vehicle attributes for the analysis display, whether or
    // not the completion call below succeeds.
    let blob = json!({
        "type": vehicle_type,
        "year": year,
        "make": make,
        "model": model,
        "mileage": format!("{mileage} miles"),
    });
    session
        .insert(LAST_SEARCH_KEY, blob)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to store search session: {e}")))?;

    let query = ProductQuery {
        vehicle_type,
        year,
        make,
        model,
        mileage,
        part_search,
    };

    let results = state.recommender.recommend(&query).await;

    Ok(Json(results))
}

/// GET /products/last-search
/// Read back the last-searched vehicle attributes stored in the session.
pub async fn last_search(session: Session) -> Result<Json<Value>, ApiError> {
    let blob = session
        .get::<Value>(LAST_SEARCH_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?
        .ok_or_else(|| ApiError::NotFound("No vehicle search recorded".to_string()))?;

    Ok(Json(blob))
}
