use std::sync::Arc;
use std::time::Duration;

use crate::cache::{self, Cache};
use crate::config::Config;
use crate::db::Store;
use crate::services::{
    ApplicationService, CachedListingService, DefaultApplicationService, ListingService,
};

/// Process-wide clients and services, built once before the server accepts traffic.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub listing_service: Arc<dyn ListingService>,

    pub application_service: Arc<dyn ApplicationService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let cache = cache::from_config(&config.cache).await;

        Ok(Self::with_clients(config, store, cache))
    }

    /// Wires the services around already constructed clients.
    #[must_use]
    pub fn with_clients(config: Config, store: Store, cache: Arc<dyn Cache>) -> Self {
        let ttl = Duration::from_secs(config.cache.open_jobs_ttl_seconds);

        let listing_service = Arc::new(CachedListingService::new(
            Arc::new(store.clone()),
            cache,
            ttl,
        )) as Arc<dyn ListingService + Send + Sync + 'static>;

        let application_service = Arc::new(DefaultApplicationService::new(Arc::new(store.clone())))
            as Arc<dyn ApplicationService + Send + Sync + 'static>;

        Self {
            config: Arc::new(config),
            store,
            listing_service,
            application_service,
        }
    }
}
