use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::db::ApplicationStore;
use crate::domain::{JobId, UserId};
use crate::models::application::{Application, UserApplication};
use crate::services::application_service::{ApplicationError, ApplicationService};

pub struct DefaultApplicationService {
    store: Arc<dyn ApplicationStore>,
}

impl DefaultApplicationService {
    #[must_use]
    pub fn new(store: Arc<dyn ApplicationStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ApplicationService for DefaultApplicationService {
    async fn apply(
        &self,
        user_id: UserId,
        job_id: JobId,
        reason: &str,
    ) -> Result<Application, ApplicationError> {
        let reason = reason.trim();
        if reason.is_empty() {
            metrics::counter!("applications_rejected_total", "reason" => "invalid_argument")
                .increment(1);
            return Err(ApplicationError::InvalidArgument(
                "Application reason is required".to_string(),
            ));
        }

        let Some(application) = self
            .store
            .insert_application_if_open(user_id, job_id, reason)
            .await?
        else {
            metrics::counter!("applications_rejected_total", "reason" => "job_not_available")
                .increment(1);
            return Err(ApplicationError::JobNotAvailable(job_id));
        };

        metrics::counter!("applications_created_total").increment(1);
        info!(
            application_id = application.id,
            user_id = %user_id,
            job_id = %job_id,
            "Application submitted"
        );
        Ok(application)
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<UserApplication>, ApplicationError> {
        Ok(self.store.list_applications_for_user(user_id).await?)
    }
}
