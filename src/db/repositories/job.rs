use crate::domain::JobId;
use crate::entities::{jobs, prelude::*};
use crate::models::job::Job;
use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

pub struct JobRepository {
    conn: DatabaseConnection,
}

impl JobRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_open(&self) -> Result<Vec<Job>> {
        let rows = Jobs::find()
            .filter(jobs::Column::IsOpen.eq(true))
            .order_by_asc(jobs::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query open jobs")?;

        Ok(rows.into_iter().map(Job::from).collect())
    }

    pub async fn list_all(&self) -> Result<Vec<Job>> {
        let rows = Jobs::find()
            .order_by_asc(jobs::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query jobs")?;

        Ok(rows.into_iter().map(Job::from).collect())
    }

    pub async fn get(&self, id: JobId) -> Result<Option<Job>> {
        let row = Jobs::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query job by ID")?;

        Ok(row.map(Job::from))
    }

    pub async fn create(&self, title: &str, description: &str) -> Result<Job> {
        let now = chrono::Utc::now().to_rfc3339();

        let active_model = jobs::ActiveModel {
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            is_open: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.conn)
            .await
            .context("Failed to insert job")?;

        info!("Created job {} ({})", model.id, model.title);
        Ok(Job::from(model))
    }

    /// Returns `false` when no job has the given id.
    pub async fn set_open(&self, id: JobId, is_open: bool) -> Result<bool> {
        let result = Jobs::update_many()
            .col_expr(
                jobs::Column::IsOpen,
                sea_orm::sea_query::Expr::value(is_open),
            )
            .col_expr(
                jobs::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().to_rfc3339()),
            )
            .filter(jobs::Column::Id.eq(id.value()))
            .exec(&self.conn)
            .await
            .context("Failed to update job")?;

        let updated = result.rows_affected > 0;
        if updated {
            info!("Job {} is_open set to {}", id, is_open);
        }
        Ok(updated)
    }

    /// Deleting a job cascades to its applications.
    pub async fn delete(&self, id: JobId) -> Result<bool> {
        let result = Jobs::delete_by_id(id.value())
            .exec(&self.conn)
            .await
            .context("Failed to delete job")?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed job with ID: {}", id);
        }
        Ok(removed)
    }
}
