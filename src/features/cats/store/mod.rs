//! Record store for cats.
//!
//! Two implementations share the [`CatStore`] contract:
//!
//! - [`InMemoryCatStore`]: process-local collection behind a single mutex
//! - [`PgCatStore`]: one PostgreSQL table accessed through parameterized queries
//!
//! The backend is picked once at startup. Status updates and deletes that
//! target an unknown id succeed without changing anything.

mod memory;
mod postgres;

pub use memory::InMemoryCatStore;
pub use postgres::PgCatStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::features::cats::models::{Cat, NewCat};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

#[async_trait]
pub trait CatStore: Send + Sync {
    /// Every record, in backend order
    async fn list_all(&self) -> Result<Vec<Cat>, StoreError>;

    /// Persist a record and return its new id
    async fn insert(&self, cat: NewCat) -> Result<i64, StoreError>;

    /// Replace the status of `id`. Unknown ids are a no-op.
    async fn update_status(&self, id: i64, status: &str) -> Result<(), StoreError>;

    /// Remove `id`. Unknown ids are a no-op.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;

    /// Check the backend is reachable
    async fn ping(&self) -> Result<(), StoreError>;

    /// Short backend name for logs and health output
    fn backend(&self) -> &'static str;
}
