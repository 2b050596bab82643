//! Persistence boundary for responses.
//!
//! Two operations only: read one day's responses, and upsert one response
//! keyed by `(day, name)`. Everything else (transport, storage, query
//! execution) belongs to the backend.

pub mod memory;
pub mod remote;
pub mod sqlite;

use crate::config::{Config, StoreBackend};
use crate::errors::AppResult;
use crate::models::response::Response;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Columns forming the upsert conflict target.
pub const CONFLICT_KEYS: [&str; 2] = ["day", "name"];

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("store did not answer within {0}s")]
    Timeout(u64),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// All responses persisted for `day`. Order is whatever the backend
    /// returns; callers display it as-is.
    async fn query(&self, day: NaiveDate) -> Result<Vec<Response>, StoreError>;

    /// Insert `response`, or replace wholesale the row with the same
    /// [`CONFLICT_KEYS`].
    async fn upsert(&self, response: &Response) -> Result<(), StoreError>;

    /// Short label for logs.
    fn describe(&self) -> String;
}

pub type SharedStore = Arc<dyn ResponseStore>;

/// Build the store selected by the configuration. `None` means local-only.
pub fn build_store(cfg: &Config) -> AppResult<Option<SharedStore>> {
    let store: Option<SharedStore> = match cfg.effective_store() {
        StoreBackend::Remote => Some(Arc::new(remote::RestStore::from_config(&cfg.remote)?)),
        StoreBackend::Sqlite => Some(Arc::new(sqlite::SqliteStore::open(&cfg.database)?)),
        StoreBackend::None | StoreBackend::Auto => None,
    };

    match &store {
        Some(s) => info!("Using response store: {}", s.describe()),
        None => info!("No response store configured, running local-only"),
    }

    Ok(store)
}
