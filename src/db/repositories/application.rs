use crate::domain::{JobId, UserId};
use crate::entities::{applications, jobs, prelude::*};
use crate::models::application::{Application, STATUS_APPLIED, UserApplication};
use anyhow::{Context, Result};
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};

pub struct ApplicationRepository {
    conn: DatabaseConnection,
}

impl ApplicationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts an application only if the job exists and is open, as one statement:
    ///
    /// ```sql
    /// INSERT INTO applications (user_id, job_id, reason, status, applied_at)
    /// SELECT ?, jobs.id, ?, 'applied', ? FROM jobs WHERE jobs.id = ? AND jobs.is_open = ?
    /// RETURNING *
    /// ```
    ///
    /// Returns `None` when no row was inserted.
    pub async fn insert_if_open(
        &self,
        user_id: UserId,
        job_id: JobId,
        reason: &str,
    ) -> Result<Option<Application>> {
        let applied_at = chrono::Utc::now().to_rfc3339();

        let open_job = Query::select()
            .expr(Expr::value(user_id.value()))
            .column((jobs::Entity, jobs::Column::Id))
            .expr(Expr::value(reason))
            .expr(Expr::value(STATUS_APPLIED))
            .expr(Expr::value(applied_at))
            .from(jobs::Entity)
            .and_where(Expr::col((jobs::Entity, jobs::Column::Id)).eq(job_id.value()))
            .and_where(Expr::col((jobs::Entity, jobs::Column::IsOpen)).eq(true))
            .to_owned();

        let mut insert = Query::insert();
        insert.into_table(applications::Entity).columns([
            applications::Column::UserId,
            applications::Column::JobId,
            applications::Column::Reason,
            applications::Column::Status,
            applications::Column::AppliedAt,
        ]);
        insert
            .select_from(open_job)
            .map_err(|e| anyhow::anyhow!("Failed to build application insert: {e}"))?;
        insert.returning_all();

        let backend = self.conn.get_database_backend();
        let inserted = Applications::find()
            .from_raw_sql(backend.build(&insert))
            .one(&self.conn)
            .await
            .context("Failed to insert application")?;

        Ok(inserted.map(Application::from))
    }

    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<UserApplication>> {
        let rows = Applications::find()
            .select_only()
            .column_as(applications::Column::Id, "application_id")
            .column(applications::Column::Reason)
            .column(applications::Column::Status)
            .column(applications::Column::AppliedAt)
            .column_as(jobs::Column::Id, "job_id")
            .column(jobs::Column::Title)
            .column(jobs::Column::Description)
            .column(jobs::Column::IsOpen)
            .join(JoinType::InnerJoin, applications::Relation::Job.def())
            .filter(applications::Column::UserId.eq(user_id.value()))
            .order_by_asc(applications::Column::Id)
            .into_model::<UserApplication>()
            .all(&self.conn)
            .await
            .context("Failed to query applications for user")?;

        Ok(rows)
    }
}
