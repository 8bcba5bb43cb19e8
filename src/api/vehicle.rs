use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::ApiError;
use super::validation::require_field;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakesQuery {
    pub vehicle_type: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelsQuery {
    pub vehicle_type: Option<String>,
    pub year: Option<String>,
    pub make: Option<String>,
}

/// GET /vehicle/makes?vehicleType&year
/// Proxy to the vehicle-data API. Upstream failures are absorbed by the
/// lookup service's fallback list, never returned as errors.
pub async fn list_makes(
    State(state): State<Arc<SharedState>>,
    Query(query): Query<MakesQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    let vehicle_type = require_field(query.vehicle_type.as_deref(), "vehicleType")?;
    let year = require_field(query.year.as_deref(), "year")?;

    let makes = state.vehicle.makes(&vehicle_type, &year).await;

    Ok(Json(makes))
}

/// GET /vehicle/models?vehicleType&year&make
pub async fn list_models(
    State(state): State<Arc<SharedState>>,
    Query(query): Query<ModelsQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    let vehicle_type = require_field(query.vehicle_type.as_deref(), "vehicleType")?;
    let year = require_field(query.year.as_deref(), "year")?;
    let make = require_field(query.make.as_deref(), "make")?;

    let models = state.vehicle.models(&vehicle_type, &year, &make).await;

    Ok(Json(models))
}
