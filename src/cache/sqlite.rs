use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, Schema, Set,
};
use std::time::Duration;
use tracing::warn;

use super::{Cache, CacheError};
use crate::entities::{cache_entries, prelude::*};

/// Cache stored as a key/value table in its own `SQLite` database, so entries
/// survive restarts and can be shared by several processes on one host.
pub struct SqliteCache {
    conn: DatabaseConnection,
}

impl SqliteCache {
    pub async fn connect(db_url: &str) -> anyhow::Result<Self> {
        let conn = crate::db::connect_sqlite(db_url, 2, 1).await?;
        let cache = Self { conn };
        cache.ensure_table().await?;
        Ok(cache)
    }

    async fn ensure_table(&self) -> anyhow::Result<()> {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);
        let stmt = schema
            .create_table_from_entity(CacheEntries)
            .if_not_exists()
            .to_owned();
        self.conn.execute(backend.build(&stmt)).await?;
        Ok(())
    }

    /// Drops expired rows. Runs on the write path only, which already needs the write lock.
    async fn purge_expired(&self) {
        let now = timestamp(Utc::now());
        if let Err(e) = CacheEntries::delete_many()
            .filter(cache_entries::Column::ExpiresAt.lte(now.as_str()))
            .exec(&self.conn)
            .await
        {
            warn!("Failed to purge expired cache entries: {e}");
        }
    }
}

/// Fixed-width UTC timestamps so string comparison matches time order.
fn timestamp(at: chrono::DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[async_trait]
impl Cache for SqliteCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = timestamp(Utc::now());

        // Read-only: a writer holding the cache database must not stall readers.
        let entry = CacheEntries::find_by_id(key.to_string())
            .filter(cache_entries::Column::ExpiresAt.gt(now.as_str()))
            .one(&self.conn)
            .await?;

        Ok(entry.map(|e| e.value))
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| CacheError::InvalidTtl(e.to_string()))?;
        let expires_at = Utc::now()
            .checked_add_signed(ttl)
            .ok_or_else(|| CacheError::InvalidTtl("expiry overflows the clock".to_string()))?;

        self.purge_expired().await;

        let active_model = cache_entries::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value.to_string()),
            expires_at: Set(timestamp(expires_at)),
        };

        CacheEntries::insert(active_model)
            .on_conflict(
                OnConflict::column(cache_entries::Column::Key)
                    .update_columns([
                        cache_entries::Column::Value,
                        cache_entries::Column::ExpiresAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;

        Ok(())
    }
}
