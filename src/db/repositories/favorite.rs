use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::entities::{favorites, parts};

pub struct FavoriteRepository {
    conn: DatabaseConnection,
}

impl FavoriteRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_pair(
        &self,
        account_id: i32,
        part_id: i32,
    ) -> Result<Option<favorites::Model>> {
        favorites::Entity::find()
            .filter(favorites::Column::AccountId.eq(account_id))
            .filter(favorites::Column::PartId.eq(part_id))
            .one(&self.conn)
            .await
            .context("Failed to query favorite pair")
    }

    /// Idempotent insert: re-adding an existing pair returns the stored row.
    pub async fn add(&self, account_id: i32, part_id: i32) -> Result<favorites::Model> {
        if let Some(existing) = self.get_pair(account_id, part_id).await? {
            return Ok(existing);
        }

        let active = favorites::ActiveModel {
            account_id: Set(account_id),
            part_id: Set(part_id),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .context("Failed to insert favorite")
    }

    pub async fn remove(&self, account_id: i32, part_id: i32) -> Result<()> {
        favorites::Entity::delete_many()
            .filter(favorites::Column::AccountId.eq(account_id))
            .filter(favorites::Column::PartId.eq(part_id))
            .exec(&self.conn)
            .await
            .context("Failed to delete favorite")?;

        Ok(())
    }

    /// Parts an account has favorited, resolved through the favorites join.
    pub async fn parts_for_account(&self, account_id: i32) -> Result<Vec<parts::Model>> {
        let rows = favorites::Entity::find()
            .filter(favorites::Column::AccountId.eq(account_id))
            .find_also_related(parts::Entity)
            .all(&self.conn)
            .await
            .context("Failed to query favorited parts")?;

        Ok(rows.into_iter().filter_map(|(_, part)| part).collect())
    }
}
