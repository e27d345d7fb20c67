use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::domain::{JobId, UserId};
use crate::entities::applications;

/// Status every application starts in.
pub const STATUS_APPLIED: &str = "applied";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: i32,
    pub user_id: UserId,
    pub job_id: JobId,
    pub reason: String,
    pub status: String,
    pub applied_at: String,
}

impl From<applications::Model> for Application {
    fn from(model: applications::Model) -> Self {
        Self {
            id: model.id,
            user_id: UserId::new(model.user_id),
            job_id: JobId::new(model.job_id),
            reason: model.reason,
            status: model.status,
            applied_at: model.applied_at,
        }
    }
}

/// One row of a user's application history: the application joined with its job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct UserApplication {
    pub application_id: i32,
    pub reason: String,
    pub status: String,
    pub applied_at: String,
    pub job_id: i32,
    pub title: String,
    pub description: String,
    pub is_open: bool,
}
