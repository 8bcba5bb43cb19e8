use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::account::Account;
pub use repositories::part::NewPart;
pub use repositories::search_history::NewSearchRecord;

use crate::entities::{favorites, parts, search_history};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn account_repo(&self) -> repositories::account::AccountRepository {
        repositories::account::AccountRepository::new(self.conn.clone())
    }

    fn part_repo(&self) -> repositories::part::PartRepository {
        repositories::part::PartRepository::new(self.conn.clone())
    }

    fn search_history_repo(&self) -> repositories::search_history::SearchHistoryRepository {
        repositories::search_history::SearchHistoryRepository::new(self.conn.clone())
    }

    fn favorite_repo(&self) -> repositories::favorite::FavoriteRepository {
        repositories::favorite::FavoriteRepository::new(self.conn.clone())
    }

    // Accounts

    pub async fn create_account(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Account> {
        self.account_repo().create(name, email, password_hash).await
    }

    pub async fn account_by_id(&self, id: i32) -> Result<Option<Account>> {
        self.account_repo().get_by_id(id).await
    }

    pub async fn account_by_email(&self, email: &str) -> Result<Option<Account>> {
        self.account_repo().get_by_email(email).await
    }

    pub async fn account_by_email_with_hash(
        &self,
        email: &str,
    ) -> Result<Option<(Account, String)>> {
        self.account_repo().get_by_email_with_hash(email).await
    }

    // Parts

    pub async fn save_part(&self, part: NewPart) -> Result<parts::Model> {
        self.part_repo().insert(part).await
    }

    pub async fn part_by_id(&self, id: i32) -> Result<Option<parts::Model>> {
        self.part_repo().get_by_id(id).await
    }

    pub async fn parts_for_vehicle(
        &self,
        vehicle_type: &str,
        year: &str,
        make: &str,
        model: &str,
    ) -> Result<Vec<parts::Model>> {
        self.part_repo()
            .find_by_vehicle(vehicle_type, year, make, model)
            .await
    }

    // Search history

    pub async fn add_search_record(
        &self,
        record: NewSearchRecord,
    ) -> Result<search_history::Model> {
        self.search_history_repo().insert(record).await
    }

    pub async fn search_records_for_account(
        &self,
        account_id: i32,
    ) -> Result<Vec<search_history::Model>> {
        self.search_history_repo().list_for_account(account_id).await
    }

    // Favorites

    pub async fn add_favorite(&self, account_id: i32, part_id: i32) -> Result<favorites::Model> {
        self.favorite_repo().add(account_id, part_id).await
    }

    pub async fn remove_favorite(&self, account_id: i32, part_id: i32) -> Result<()> {
        self.favorite_repo().remove(account_id, part_id).await
    }

    pub async fn favorite_parts(&self, account_id: i32) -> Result<Vec<parts::Model>> {
        self.favorite_repo().parts_for_account(account_id).await
    }
}
