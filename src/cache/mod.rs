//! Best-effort key/value cache with per-entry expiry.
//!
//! Callers must treat every [`CacheError`] as a miss: the cache accelerates
//! reads but is never required for a correct answer.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{CacheBackend, CacheConfig};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryCache;
pub use sqlite::SqliteCache;

/// Key holding the serialized list of open jobs.
pub const OPEN_JOBS_KEY: &str = "openJobs";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid TTL: {0}")]
    InvalidTtl(String),
}

impl From<sea_orm::DbErr> for CacheError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Unavailable(err.to_string())
    }
}

#[async_trait]
pub trait Cache: Send + Sync {
    /// Returns the live value for `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `value` under `key`, replacing any previous entry; it expires after `ttl`.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;
}

/// Cache that never holds anything. Used when caching is switched off.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

#[async_trait]
impl Cache for NoopCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Ok(None)
    }

    async fn set_with_ttl(
        &self,
        _key: &str,
        _value: &str,
        _ttl: Duration,
    ) -> Result<(), CacheError> {
        Ok(())
    }
}

/// Builds the cache client selected by configuration.
///
/// A backend that cannot be opened degrades to [`NoopCache`]; startup never
/// fails because of the cache.
pub async fn from_config(config: &CacheConfig) -> Arc<dyn Cache> {
    if !config.enabled {
        info!("Cache disabled, open jobs are always read from the database");
        return Arc::new(NoopCache);
    }

    let cache: Arc<dyn Cache> = match config.backend {
        CacheBackend::Memory => Arc::new(MemoryCache::new()),
        CacheBackend::Sqlite => match SqliteCache::connect(&config.sqlite_path).await {
            Ok(cache) => Arc::new(cache),
            Err(e) => {
                warn!(
                    "Cache database {} unavailable, serving uncached: {e:#}",
                    config.sqlite_path
                );
                metrics::counter!("open_jobs_cache_errors_total", "op" => "connect").increment(1);
                return Arc::new(NoopCache);
            }
        },
    };

    info!("Cache initialized ({:?} backend)", config.backend);
    cache
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_cache_always_misses() {
        let cache = NoopCache;
        cache
            .set_with_ttl(OPEN_JOBS_KEY, "[]", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(cache.get(OPEN_JOBS_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn disabled_config_builds_noop_cache() {
        let config = CacheConfig {
            enabled: false,
            ..CacheConfig::default()
        };
        let cache = from_config(&config).await;
        cache
            .set_with_ttl("k", "v", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn unreachable_sqlite_backend_degrades_to_noop() {
        // A regular file cannot be a parent directory, so the database can never be created.
        let blocker = std::env::temp_dir().join(format!("hireboard-{}", uuid::Uuid::new_v4()));
        std::fs::write(&blocker, b"").unwrap();

        let config = CacheConfig {
            backend: CacheBackend::Sqlite,
            sqlite_path: format!("sqlite:{}/cache.db", blocker.display()),
            ..CacheConfig::default()
        };
        let cache = from_config(&config).await;

        cache
            .set_with_ttl(OPEN_JOBS_KEY, "[]", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(cache.get(OPEN_JOBS_KEY).await.unwrap(), None);

        let _ = std::fs::remove_file(&blocker);
    }
}
