//! Cache-aside implementation of [`ListingService`].

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::cache::{Cache, OPEN_JOBS_KEY};
use crate::db::JobStore;
use crate::domain::JobId;
use crate::models::job::Job;
use crate::services::listing_service::{ListingError, ListingService};

pub struct CachedListingService {
    store: Arc<dyn JobStore>,
    cache: Arc<dyn Cache>,
    ttl: Duration,
}

impl CachedListingService {
    #[must_use]
    pub fn new(store: Arc<dyn JobStore>, cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self { store, cache, ttl }
    }

    /// Any failure, including an undecodable payload, is reported as a miss.
    async fn cached_open_jobs(&self) -> Option<Vec<Job>> {
        let raw = match self.cache.get(OPEN_JOBS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Cache read failed, falling back to database: {e}");
                metrics::counter!("open_jobs_cache_errors_total", "op" => "get").increment(1);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(jobs) => Some(jobs),
            Err(e) => {
                warn!("Discarding undecodable cached open jobs: {e}");
                metrics::counter!("open_jobs_cache_errors_total", "op" => "decode").increment(1);
                None
            }
        }
    }

    async fn populate(&self, jobs: &[Job]) {
        let payload = match serde_json::to_string(jobs) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to serialize open jobs for caching: {e}");
                return;
            }
        };

        if let Err(e) = self.cache.set_with_ttl(OPEN_JOBS_KEY, &payload, self.ttl).await {
            warn!("Cache write failed, serving uncached result: {e}");
            metrics::counter!("open_jobs_cache_errors_total", "op" => "set").increment(1);
        }
    }
}

#[async_trait]
impl ListingService for CachedListingService {
    async fn get_open_jobs(&self) -> Result<Vec<Job>, ListingError> {
        if let Some(jobs) = self.cached_open_jobs().await {
            debug!(count = jobs.len(), "Returning cached open jobs");
            metrics::counter!("open_jobs_cache_hits_total").increment(1);
            return Ok(jobs);
        }

        metrics::counter!("open_jobs_cache_misses_total").increment(1);
        let jobs = self.store.list_open_jobs().await?;
        self.populate(&jobs).await;

        debug!(count = jobs.len(), "Loaded open jobs from database");
        Ok(jobs)
    }

    async fn get_job(&self, id: JobId) -> Result<Job, ListingError> {
        self.store
            .get_job(id)
            .await?
            .ok_or(ListingError::NotFound(id))
    }
}
