use serde::Serialize;

use crate::db::Account;
use crate::entities::{favorites, parts, search_history};

/// Error body for every 4xx/5xx response: `{"error": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Public account view. The credential hash is never serialized.
#[derive(Debug, Serialize)]
pub struct AccountDto {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<Account> for AccountDto {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub condition_rating: i32,
    pub estimated_price: String,
    pub image_url: String,
    pub vehicle_type: String,
    pub year: String,
    pub make: String,
    pub model: String,
    pub created_at: String,
}

impl From<parts::Model> for PartDto {
    fn from(model: parts::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            condition_rating: model.condition_rating,
            estimated_price: model.estimated_price,
            image_url: model.image_url,
            vehicle_type: model.vehicle_type,
            year: model.year,
            make: model.make,
            model: model.model,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecordDto {
    pub id: i32,
    pub user_id: i32,
    pub vehicle_type: String,
    pub year: String,
    pub make: String,
    pub model: String,
    pub mileage: Option<String>,
    pub part_search: String,
    pub created_at: String,
}

impl From<search_history::Model> for SearchRecordDto {
    fn from(model: search_history::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.account_id,
            vehicle_type: model.vehicle_type,
            year: model.year,
            make: model.make,
            model: model.model,
            mileage: model.mileage,
            part_search: model.part_search,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteDto {
    pub id: i32,
    pub user_id: i32,
    pub part_id: i32,
    pub created_at: String,
}

impl From<favorites::Model> for FavoriteDto {
    fn from(model: favorites::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.account_id,
            part_id: model.part_id,
            created_at: model.created_at,
        }
    }
}
