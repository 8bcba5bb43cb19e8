use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{require_field, require_id};
use super::{AccountDto, ApiError, FavoriteDto, PartDto, SearchRecordDto};
use crate::db::NewSearchRecord;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    pub id: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    pub user_id: Option<i32>,
    pub part_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteQuery {
    pub user_id: Option<i32>,
    pub part_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountQuery {
    pub user_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecordRequest {
    pub user_id: Option<i32>,
    pub vehicle_type: Option<String>,
    pub year: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub mileage: Option<String>,
    pub part_search: Option<String>,
}

/// GET /user/profile?id=
pub async fn get_profile(
    State(state): State<Arc<SharedState>>,
    Query(query): Query<ProfileQuery>,
) -> Result<Json<AccountDto>, ApiError> {
    let id = require_id(query.id, "id")?;

    let account = state
        .store
        .account_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Account", id))?;

    Ok(Json(AccountDto::from(account)))
}

/// POST /user/favorites
/// Favoriting requires both referenced records to exist. Re-adding an
/// existing pair is idempotent and returns the stored favorite.
pub async fn add_favorite(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<FavoriteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let account_id = require_id(payload.user_id, "userId")?;
    let part_id = require_id(payload.part_id, "partId")?;

    state
        .store
        .account_by_id(account_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Account", account_id))?;

    state
        .store
        .part_by_id(part_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Part", part_id))?;

    let favorite = state.store.add_favorite(account_id, part_id).await?;

    Ok((StatusCode::CREATED, Json(FavoriteDto::from(favorite))))
}

/// DELETE /user/favorites?userId=&partId=
pub async fn remove_favorite(
    State(state): State<Arc<SharedState>>,
    Query(query): Query<FavoriteQuery>,
) -> Result<StatusCode, ApiError> {
    let account_id = require_id(query.user_id, "userId")?;
    let part_id = require_id(query.part_id, "partId")?;

    state.store.remove_favorite(account_id, part_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /user/favorites?userId=
pub async fn list_favorites(
    State(state): State<Arc<SharedState>>,
    Query(query): Query<AccountQuery>,
) -> Result<Json<Vec<PartDto>>, ApiError> {
    let account_id = require_id(query.user_id, "userId")?;

    let parts = state.store.favorite_parts(account_id).await?;

    Ok(Json(parts.into_iter().map(PartDto::from).collect()))
}

/// POST /user/search-history
pub async fn add_search_record(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<SearchRecordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let account_id = require_id(payload.user_id, "userId")?;
    let vehicle_type = require_field(payload.vehicle_type.as_deref(), "vehicleType")?;
    let year = require_field(payload.year.as_deref(), "year")?;
    let make = require_field(payload.make.as_deref(), "make")?;
    let model = require_field(payload.model.as_deref(), "model")?;
    let part_search = require_field(payload.part_search.as_deref(), "partSearch")?;

    state
        .store
        .account_by_id(account_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Account", account_id))?;

    let record = state
        .store
        .add_search_record(NewSearchRecord {
            account_id,
            vehicle_type,
            year,
            make,
            model,
            mileage: payload.mileage,
            part_search,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(SearchRecordDto::from(record))))
}

/// GET /user/search-history?userId=
/// Records come back in creation order.
pub async fn list_search_records(
    State(state): State<Arc<SharedState>>,
    Query(query): Query<AccountQuery>,
) -> Result<Json<Vec<SearchRecordDto>>, ApiError> {
    let account_id = require_id(query.user_id, "userId")?;

    let records = state.store.search_records_for_account(account_id).await?;

    Ok(Json(records.into_iter().map(SearchRecordDto::from).collect()))
}
