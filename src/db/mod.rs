use crate::config::SecurityConfig;
use crate::domain::{JobId, UserId};
use crate::models::application::{Application, UserApplication};
use crate::models::job::Job;
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::user::User;

/// Read side of the job table consumed by the listing service.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn list_open_jobs(&self) -> Result<Vec<Job>>;

    async fn get_job(&self, id: JobId) -> Result<Option<Job>>;
}

/// Application persistence consumed by the application service.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Atomically inserts an application if `job_id` names an open job.
    /// `Ok(None)` means the job is unknown or closed and nothing was written.
    async fn insert_application_if_open(
        &self,
        user_id: UserId,
        job_id: JobId,
        reason: &str,
    ) -> Result<Option<Application>>;

    async fn list_applications_for_user(&self, user_id: UserId) -> Result<Vec<UserApplication>>;
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let conn = connect_sqlite(db_url, max_connections, min_connections).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        info!("Database connection closed");
        Ok(())
    }

    fn job_repo(&self) -> repositories::job::JobRepository {
        repositories::job::JobRepository::new(self.conn.clone())
    }

    fn application_repo(&self) -> repositories::application::ApplicationRepository {
        repositories::application::ApplicationRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    pub async fn list_open_jobs(&self) -> Result<Vec<Job>> {
        self.job_repo().list_open().await
    }

    pub async fn list_all_jobs(&self) -> Result<Vec<Job>> {
        self.job_repo().list_all().await
    }

    pub async fn get_job(&self, id: JobId) -> Result<Option<Job>> {
        self.job_repo().get(id).await
    }

    pub async fn create_job(&self, title: &str, description: &str) -> Result<Job> {
        self.job_repo().create(title, description).await
    }

    pub async fn set_job_open(&self, id: JobId, is_open: bool) -> Result<bool> {
        self.job_repo().set_open(id, is_open).await
    }

    pub async fn delete_job(&self, id: JobId) -> Result<bool> {
        self.job_repo().delete(id).await
    }

    pub async fn insert_application_if_open(
        &self,
        user_id: UserId,
        job_id: JobId,
        reason: &str,
    ) -> Result<Option<Application>> {
        self.application_repo()
            .insert_if_open(user_id, job_id, reason)
            .await
    }

    pub async fn list_applications_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<UserApplication>> {
        self.application_repo().list_for_user(user_id).await
    }

    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        security: &SecurityConfig,
    ) -> Result<User> {
        self.user_repo()
            .create(name, email, password, security)
            .await
    }

    pub async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn delete_user(&self, id: UserId) -> Result<bool> {
        self.user_repo().delete(id).await
    }

    pub async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>> {
        self.user_repo().verify_api_key(api_key).await
    }
}

#[async_trait]
impl JobStore for Store {
    async fn list_open_jobs(&self) -> Result<Vec<Job>> {
        Self::list_open_jobs(self).await
    }

    async fn get_job(&self, id: JobId) -> Result<Option<Job>> {
        Self::get_job(self, id).await
    }
}

#[async_trait]
impl ApplicationStore for Store {
    async fn insert_application_if_open(
        &self,
        user_id: UserId,
        job_id: JobId,
        reason: &str,
    ) -> Result<Option<Application>> {
        Self::insert_application_if_open(self, user_id, job_id, reason).await
    }

    async fn list_applications_for_user(&self, user_id: UserId) -> Result<Vec<UserApplication>> {
        Self::list_applications_for_user(self, user_id).await
    }
}

/// Opens a pooled `SQLite` connection, creating the database file if needed.
///
/// In-memory databases live and die with their connection, so they get a
/// single connection that is never recycled.
pub(crate) async fn connect_sqlite(
    db_url: &str,
    max_connections: u32,
    min_connections: u32,
) -> Result<DatabaseConnection> {
    let in_memory = db_url.contains(":memory:");

    if !in_memory {
        let path_str = db_url
            .trim_start_matches("sqlite://")
            .trim_start_matches("sqlite:");
        let path_str = path_str.split('?').next().unwrap_or(path_str);
        if let Some(parent) = Path::new(path_str).parent() {
            tokio::fs::create_dir_all(parent).await.ok();
        }
        if !Path::new(path_str).exists() {
            std::fs::File::create(path_str)?;
        }
    }

    let mut opt = ConnectOptions::new(db_url.to_string());
    if in_memory {
        opt.max_connections(1).min_connections(1);
    } else {
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600));
    }
    opt.connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    Ok(Database::connect(opt).await?)
}
