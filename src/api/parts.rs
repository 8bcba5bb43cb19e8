use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{require_field, require_id, validate_condition_rating};
use super::{ApiError, PartDto};
use crate::db::NewPart;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub condition_rating: Option<i32>,
    pub estimated_price: Option<String>,
    pub image_url: Option<String>,
    pub vehicle_type: Option<String>,
    pub year: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleFilter {
    pub vehicle_type: Option<String>,
    pub year: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
}

/// POST /parts
pub async fn create_part(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<CreatePartRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = require_field(payload.name.as_deref(), "name")?;
    let description = require_field(payload.description.as_deref(), "description")?;
    let condition_rating = payload
        .condition_rating
        .ok_or_else(|| ApiError::validation("conditionRating is required"))?;
    let condition_rating = validate_condition_rating(condition_rating)?;
    let estimated_price = require_field(payload.estimated_price.as_deref(), "estimatedPrice")?;
    let image_url = require_field(payload.image_url.as_deref(), "imageUrl")?;
    let vehicle_type = require_field(payload.vehicle_type.as_deref(), "vehicleType")?;
    let year = require_field(payload.year.as_deref(), "year")?;
    let make = require_field(payload.make.as_deref(), "make")?;
    let model = require_field(payload.model.as_deref(), "model")?;

    let part = state
        .store
        .save_part(NewPart {
            name,
            description,
            condition_rating,
            estimated_price,
            image_url,
            vehicle_type,
            year,
            make,
            model,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(PartDto::from(part))))
}

/// GET /parts?vehicleType&year&make&model
/// Exact-match filter on the full vehicle tuple.
pub async fn list_parts(
    State(state): State<Arc<SharedState>>,
    Query(query): Query<VehicleFilter>,
) -> Result<Json<Vec<PartDto>>, ApiError> {
    let vehicle_type = require_field(query.vehicle_type.as_deref(), "vehicleType")?;
    let year = require_field(query.year.as_deref(), "year")?;
    let make = require_field(query.make.as_deref(), "make")?;
    let model = require_field(query.model.as_deref(), "model")?;

    let parts = state
        .store
        .parts_for_vehicle(&vehicle_type, &year, &make, &model)
        .await?;

    Ok(Json(parts.into_iter().map(PartDto::from).collect()))
}

/// GET /parts/{id}
pub async fn get_part(
    State(state): State<Arc<SharedState>>,
    Path(id): Path<i32>,
) -> Result<Json<PartDto>, ApiError> {
    let id = require_id(Some(id), "id")?;

    let part = state
        .store
        .part_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Part", id))?;

    Ok(Json(PartDto::from(part)))
}
