use serde::{Deserialize, Serialize};

use crate::domain::JobId;
use crate::entities::jobs;

/// A job posting as served to readers and stored in the open-jobs cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub is_open: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<jobs::Model> for Job {
    fn from(model: jobs::Model) -> Self {
        Self {
            id: JobId::new(model.id),
            title: model.title,
            description: model.description,
            is_open: model.is_open,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
