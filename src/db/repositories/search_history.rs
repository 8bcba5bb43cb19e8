use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::search_history;

/// Insert payload for a search record
#[derive(Debug, Clone)]
pub struct NewSearchRecord {
    pub account_id: i32,
    pub vehicle_type: String,
    pub year: String,
    pub make: String,
    pub model: String,
    pub mileage: Option<String>,
    pub part_search: String,
}

pub struct SearchHistoryRepository {
    conn: DatabaseConnection,
}

impl SearchHistoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, record: NewSearchRecord) -> Result<search_history::Model> {
        let active = search_history::ActiveModel {
            account_id: Set(record.account_id),
            vehicle_type: Set(record.vehicle_type),
            year: Set(record.year),
            make: Set(record.make),
            model: Set(record.model),
            mileage: Set(record.mileage),
            part_search: Set(record.part_search),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .context("Failed to insert search record")
    }

    pub async fn list_for_account(&self, account_id: i32) -> Result<Vec<search_history::Model>> {
        search_history::Entity::find()
            .filter(search_history::Column::AccountId.eq(account_id))
            .order_by_asc(search_history::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to query search history")
    }
}
