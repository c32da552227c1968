//! Record store abstraction.
//!
//! The [`UserStore`] trait is the only way the service reaches user records.
//! Handlers receive it as an injected `Arc<dyn UserStore>`, so the nearby
//! pipeline can run against PostgreSQL in production and an in-memory store
//! in tests.

use async_trait::async_trait;
use thiserror::Error;
use crate::models::{CandidateFilter, LocationUpdate, UserRecord};

/// Errors that can occur when interacting with the record store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Abstract user record store
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`find_candidates`](UserStore::find_candidates) | Records to evaluate for a proximity query |
/// | [`update_location`](UserStore::update_location) | Write the acting user's reported position |
/// | [`sample_one`](UserStore::sample_one) | One uniformly random record |
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch proximity candidates
    ///
    /// Implementations may narrow the set (e.g. with a geospatial index) but
    /// must return every record the ranking would keep.
    async fn find_candidates(&self, filter: &CandidateFilter) -> Result<Vec<UserRecord>, StoreError>;

    /// Update coords, location text and timestamp of the record with `user_id`
    async fn update_location(&self, user_id: &str, update: &LocationUpdate) -> Result<(), StoreError>;

    /// Pick one record at random, `None` when the store is empty
    async fn sample_one(&self) -> Result<Option<UserRecord>, StoreError>;

    /// Connectivity probe for health checks
    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
