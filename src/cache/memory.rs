use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use super::{Cache, CacheError};

struct CacheSlot {
    value: String,
    expires_at: Instant,
}

/// In-process cache. Expiry uses the tokio clock so paused-time tests can step past a TTL.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheSlot>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = Instant::now();

        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(slot) if slot.expires_at > now => return Ok(Some(slot.value.clone())),
                Some(_) => {}
            }
        }

        // Expired: prune everything stale while we hold the write lock.
        self.entries
            .write()
            .await
            .retain(|_, slot| slot.expires_at > now);
        Ok(None)
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let expires_at = Instant::now()
            .checked_add(ttl)
            .ok_or_else(|| CacheError::InvalidTtl(format!("{ttl:?} overflows the clock")))?;

        self.entries.write().await.insert(
            key.to_string(),
            CacheSlot {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }
}
