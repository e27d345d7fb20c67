//! Guarded application writes and per-user history against a real database.

use async_trait::async_trait;
use hireboard::config::SecurityConfig;
use hireboard::db::{ApplicationStore, Store, User};
use hireboard::domain::{JobId, UserId};
use hireboard::entities::prelude::Applications;
use hireboard::models::application::{Application, STATUS_APPLIED, UserApplication};
use hireboard::services::{ApplicationError, ApplicationService, DefaultApplicationService};
use sea_orm::{EntityTrait, PaginatorTrait};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn fast_hashing() -> SecurityConfig {
    SecurityConfig {
        argon2_memory_cost_kib: 1024,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
    }
}

async fn store() -> Store {
    Store::new("sqlite::memory:")
        .await
        .expect("Failed to open in-memory store")
}

async fn user(store: &Store, name: &str) -> User {
    store
        .create_user(name, &format!("{name}@example.com"), "password", &fast_hashing())
        .await
        .unwrap()
}

async fn application_count(store: &Store) -> u64 {
    Applications::find().count(&store.conn).await.unwrap()
}

/// Forwards to a real store while counting every call.
struct CountingStore {
    inner: Store,
    calls: AtomicUsize,
}

#[async_trait]
impl ApplicationStore for CountingStore {
    async fn insert_application_if_open(
        &self,
        user_id: UserId,
        job_id: JobId,
        reason: &str,
    ) -> anyhow::Result<Option<Application>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .insert_application_if_open(user_id, job_id, reason)
            .await
    }

    async fn list_applications_for_user(
        &self,
        user_id: UserId,
    ) -> anyhow::Result<Vec<UserApplication>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list_applications_for_user(user_id).await
    }
}

struct BrokenStore;

#[async_trait]
impl ApplicationStore for BrokenStore {
    async fn insert_application_if_open(
        &self,
        _user_id: UserId,
        _job_id: JobId,
        _reason: &str,
    ) -> anyhow::Result<Option<Application>> {
        anyhow::bail!("database is locked")
    }

    async fn list_applications_for_user(
        &self,
        _user_id: UserId,
    ) -> anyhow::Result<Vec<UserApplication>> {
        anyhow::bail!("database is locked")
    }
}

fn service(store: &Store) -> DefaultApplicationService {
    DefaultApplicationService::new(Arc::new(store.clone()))
}

#[tokio::test]
async fn empty_reason_is_rejected_before_touching_the_store() {
    let store = store().await;
    let alice = user(&store, "alice").await;
    let job = store.create_job("Engineer", "Rust").await.unwrap();

    let counting = Arc::new(CountingStore {
        inner: store.clone(),
        calls: AtomicUsize::new(0),
    });
    let applications = DefaultApplicationService::new(counting.clone());

    for reason in ["", "   ", "\n\t"] {
        let err = applications.apply(alice.id, job.id, reason).await.unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidArgument(_)));
    }

    assert_eq!(counting.calls.load(Ordering::SeqCst), 0);
    assert_eq!(application_count(&store).await, 0);
}

#[tokio::test]
async fn closed_job_rejects_application() {
    let store = store().await;
    let alice = user(&store, "alice").await;
    let job = store.create_job("Engineer", "Rust").await.unwrap();
    assert!(store.set_job_open(job.id, false).await.unwrap());

    let err = service(&store)
        .apply(alice.id, job.id, "interested")
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::JobNotAvailable(id) if id == job.id));
    assert_eq!(application_count(&store).await, 0);
}

#[tokio::test]
async fn unknown_job_rejects_application() {
    let store = store().await;
    let alice = user(&store, "alice").await;

    let err = service(&store)
        .apply(alice.id, JobId::new(404), "interested")
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::JobNotAvailable(_)));
    assert_eq!(application_count(&store).await, 0);
}

#[tokio::test]
async fn open_job_records_exactly_one_application() {
    let store = store().await;
    let alice = user(&store, "alice").await;
    let job = store.create_job("Engineer", "Rust").await.unwrap();

    let application = service(&store)
        .apply(alice.id, job.id, "  I like Rust  ")
        .await
        .unwrap();

    assert_eq!(application.user_id, alice.id);
    assert_eq!(application.job_id, job.id);
    assert_eq!(application.reason, "I like Rust");
    assert_eq!(application.status, STATUS_APPLIED);
    assert!(!application.applied_at.is_empty());
    assert_eq!(application_count(&store).await, 1);
}

#[tokio::test]
async fn reopened_job_accepts_applications_again() {
    let store = store().await;
    let alice = user(&store, "alice").await;
    let job = store.create_job("Engineer", "Rust").await.unwrap();
    let applications = service(&store);

    store.set_job_open(job.id, false).await.unwrap();
    assert!(applications.apply(alice.id, job.id, "first").await.is_err());

    store.set_job_open(job.id, true).await.unwrap();
    assert!(applications.apply(alice.id, job.id, "second").await.is_ok());
    assert_eq!(application_count(&store).await, 1);
}

#[tokio::test]
async fn repeated_applications_are_all_recorded() {
    let store = store().await;
    let alice = user(&store, "alice").await;
    let job = store.create_job("Engineer", "Rust").await.unwrap();
    let applications = service(&store);

    let first = applications.apply(alice.id, job.id, "first").await.unwrap();
    let second = applications.apply(alice.id, job.id, "second").await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(applications.list_for_user(alice.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn concurrent_applications_from_many_users_succeed() {
    let store = store().await;
    let job = store.create_job("Engineer", "Rust").await.unwrap();
    let applications = Arc::new(service(&store));

    let mut users = Vec::new();
    for i in 0..5 {
        users.push(user(&store, &format!("user{i}")).await);
    }

    let writes = users.iter().map(|u| {
        let applications = applications.clone();
        let user_id = u.id;
        async move { applications.apply(user_id, job.id, "interested").await }
    });
    let results = futures::future::join_all(writes).await;

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(application_count(&store).await, 5);
}

#[tokio::test]
async fn history_only_contains_own_applications_joined_with_jobs() {
    let store = store().await;
    let alice = user(&store, "alice").await;
    let bob = user(&store, "bob").await;
    let rust = store.create_job("Rust Engineer", "Systems").await.unwrap();
    let go = store.create_job("Go Engineer", "Services").await.unwrap();
    let applications = service(&store);

    applications.apply(alice.id, rust.id, "love it").await.unwrap();
    applications.apply(alice.id, go.id, "also fine").await.unwrap();
    applications.apply(bob.id, go.id, "mine").await.unwrap();

    // Closing a job keeps it in the history, with its current state.
    store.set_job_open(go.id, false).await.unwrap();

    let history = applications.list_for_user(alice.id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].job_id, rust.id.value());
    assert_eq!(history[0].title, "Rust Engineer");
    assert_eq!(history[0].reason, "love it");
    assert!(history[0].is_open);
    assert_eq!(history[1].title, "Go Engineer");
    assert!(!history[1].is_open);
    assert!(history.iter().all(|a| a.status == STATUS_APPLIED));

    let bobs = applications.list_for_user(bob.id).await.unwrap();
    assert_eq!(bobs.len(), 1);
    assert_eq!(bobs[0].reason, "mine");
}

#[tokio::test]
async fn history_is_empty_for_user_without_applications() {
    let store = store().await;
    let carol = user(&store, "carol").await;

    assert!(service(&store).list_for_user(carol.id).await.unwrap().is_empty());
    assert!(
        service(&store)
            .list_for_user(UserId::new(999))
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn deleting_job_removes_its_applications() {
    let store = store().await;
    let alice = user(&store, "alice").await;
    let keep = store.create_job("Keep", "stays").await.unwrap();
    let gone = store.create_job("Gone", "deleted").await.unwrap();
    let applications = service(&store);

    applications.apply(alice.id, keep.id, "a").await.unwrap();
    applications.apply(alice.id, gone.id, "b").await.unwrap();

    assert!(store.delete_job(gone.id).await.unwrap());

    let history = applications.list_for_user(alice.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].title, "Keep");
    assert_eq!(application_count(&store).await, 1);
}

#[tokio::test]
async fn deleting_user_removes_their_applications() {
    let store = store().await;
    let alice = user(&store, "alice").await;
    let bob = user(&store, "bob").await;
    let job = store.create_job("Engineer", "Rust").await.unwrap();
    let applications = service(&store);

    applications.apply(alice.id, job.id, "a").await.unwrap();
    applications.apply(bob.id, job.id, "b").await.unwrap();

    assert!(store.delete_user(alice.id).await.unwrap());
    assert!(store.get_user(alice.id).await.unwrap().is_none());
    assert_eq!(application_count(&store).await, 1);
}

#[tokio::test]
async fn store_failures_surface_as_store_unavailable() {
    let applications = DefaultApplicationService::new(Arc::new(BrokenStore));

    let err = applications
        .apply(UserId::new(7), JobId::new(2), "interested")
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::StoreUnavailable(_)));

    let err = applications.list_for_user(UserId::new(7)).await.unwrap_err();
    assert!(matches!(err, ApplicationError::StoreUnavailable(_)));
}

#[tokio::test]
async fn duplicate_email_is_rejected_and_first_user_kept() {
    let store = store().await;
    let alice = user(&store, "alice").await;

    let duplicate = store
        .create_user("Alice Again", "alice@example.com", "password", &fast_hashing())
        .await;
    assert!(duplicate.is_err());

    let kept = store.get_user(alice.id).await.unwrap().unwrap();
    assert_eq!(kept.name, "alice");
    assert_eq!(kept.email, "alice@example.com");

    let by_key = store.verify_api_key(&alice.api_key).await.unwrap().unwrap();
    assert_eq!(by_key.id, alice.id);
}
