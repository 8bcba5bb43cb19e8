use std::sync::Arc;
use tokio::sync::RwLock;

use crate::clients::openrouter::{OpenRouterClient, OpenRouterConfig};
use crate::clients::vpic::VpicClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::{IdentityService, RecommendationService, VehicleService};

/// Build a shared HTTP client with reasonable defaults for API calls.
/// This client should be reused across all HTTP-based services to enable
/// connection pooling and avoid socket exhaustion.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent("Camber/1.0")
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub vpic: Arc<VpicClient>,

    pub vehicle: Arc<VehicleService>,

    pub recommender: Arc<RecommendationService>,

    pub identity: Arc<IdentityService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let http_client =
            build_shared_http_client(config.vehicle_data.request_timeout_seconds)?;

        let vpic = Arc::new(VpicClient::with_shared_client(
            http_client.clone(),
            config.vehicle_data.base_url.clone(),
        ));
        let vehicle = Arc::new(VehicleService::new(vpic.clone()));

        let recommender = Arc::new(RecommendationService::new(
            OpenRouterClient::with_shared_client(
                http_client,
                OpenRouterConfig {
                    base_url: config.recommender.base_url.clone(),
                    api_key: config.recommender.api_key.clone(),
                    model: config.recommender.model.clone(),
                    referer: config.recommender.referer.clone(),
                    app_title: config.recommender.app_title.clone(),
                },
            ),
        ));

        let identity = Arc::new(IdentityService::new(
            store.clone(),
            config.security.clone(),
        ));

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            vpic,
            vehicle,
            recommender,
            identity,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
