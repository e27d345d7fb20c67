//! Domain service for reading job postings.
//!
//! The open-jobs listing is served cache-aside: a live cache entry answers
//! without touching the database, a miss (or any cache failure) reads the
//! database and repopulates the entry.

use thiserror::Error;

use crate::domain::JobId;
use crate::models::job::Job;

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("Job not found: {0}")]
    NotFound(JobId),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<anyhow::Error> for ListingError {
    fn from(err: anyhow::Error) -> Self {
        Self::StoreUnavailable(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait ListingService: Send + Sync {
    /// Returns every open job, possibly from a snapshot up to one TTL old.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::StoreUnavailable`] only when the cache could
    /// not answer and the database query failed.
    async fn get_open_jobs(&self) -> Result<Vec<Job>, ListingError>;

    /// Fetches a single job, open or closed, straight from the database.
    ///
    /// # Errors
    ///
    /// - Returns [`ListingError::NotFound`] if no job has this id
    /// - Returns [`ListingError::StoreUnavailable`] on database failures
    async fn get_job(&self, id: JobId) -> Result<Job, ListingError>;
}
