//! Domain service for job applications.

use thiserror::Error;

use crate::domain::{JobId, UserId};
use crate::models::application::{Application, UserApplication};

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The job is unknown or closed; callers cannot tell which.
    #[error("Job {0} not found or not open for applications")]
    JobNotAvailable(JobId),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<anyhow::Error> for ApplicationError {
    fn from(err: anyhow::Error) -> Self {
        Self::StoreUnavailable(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait ApplicationService: Send + Sync {
    /// Records that `user_id` applied to `job_id`.
    ///
    /// The open-job check and the insert happen in a single statement, so an
    /// application is never recorded against a job that was closed at write time.
    ///
    /// # Errors
    ///
    /// - Returns [`ApplicationError::InvalidArgument`] for an empty reason, before any database access
    /// - Returns [`ApplicationError::JobNotAvailable`] if the job is missing or closed
    /// - Returns [`ApplicationError::StoreUnavailable`] on database failures
    async fn apply(
        &self,
        user_id: UserId,
        job_id: JobId,
        reason: &str,
    ) -> Result<Application, ApplicationError>;

    /// Lists the caller's own applications together with their jobs.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::StoreUnavailable`] on database failures.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<UserApplication>, ApplicationError>;
}
