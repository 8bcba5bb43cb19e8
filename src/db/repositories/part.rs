use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::entities::parts;

/// Insert payload for a part record
#[derive(Debug, Clone)]
pub struct NewPart {
    pub name: String,
    pub description: String,
    pub condition_rating: i32,
    pub estimated_price: String,
    pub image_url: String,
    pub vehicle_type: String,
    pub year: String,
    pub make: String,
    pub model: String,
}

pub struct PartRepository {
    conn: DatabaseConnection,
}

impl PartRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, part: NewPart) -> Result<parts::Model> {
        let active = parts::ActiveModel {
            name: Set(part.name),
            description: Set(part.description),
            condition_rating: Set(part.condition_rating),
            estimated_price: Set(part.estimated_price),
            image_url: Set(part.image_url),
            vehicle_type: Set(part.vehicle_type),
            year: Set(part.year),
            make: Set(part.make),
            model: Set(part.model),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        active.insert(&self.conn).await.context("Failed to insert part")
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<parts::Model>> {
        parts::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query part by ID")
    }

    /// Exact-match filter on the full vehicle tuple. Never matches substrings.
    pub async fn find_by_vehicle(
        &self,
        vehicle_type: &str,
        year: &str,
        make: &str,
        model: &str,
    ) -> Result<Vec<parts::Model>> {
        parts::Entity::find()
            .filter(parts::Column::VehicleType.eq(vehicle_type))
            .filter(parts::Column::Year.eq(year))
            .filter(parts::Column::Make.eq(make))
            .filter(parts::Column::Model.eq(model))
            .all(&self.conn)
            .await
            .context("Failed to query parts by vehicle")
    }
}
