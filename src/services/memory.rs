//! In-memory [`UserStore`] for tests and local development.
//!
//! Records live in a `Vec` behind `std::sync::RwLock`; insertion order is the
//! order candidates are returned in.

use std::sync::RwLock;

use async_trait::async_trait;
use rand::seq::SliceRandom;

use crate::models::{CandidateFilter, LocationUpdate, UserRecord};
use super::store::{StoreError, UserStore};

pub struct InMemoryUserStore {
    users: RwLock<Vec<UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    pub fn with_users(users: Vec<UserRecord>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    /// Insert a record, replacing any existing record with the same id
    pub fn insert(&self, user: UserRecord) -> Result<(), StoreError> {
        let mut users = self.write()?;
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user,
            None => users.push(user),
        }
        Ok(())
    }

    pub fn get(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.read()?.iter().find(|u| u.id == user_id).cloned())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<UserRecord>>, StoreError> {
        self.users
            .read()
            .map_err(|_| StoreError::Unavailable("user store lock poisoned".into()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<UserRecord>>, StoreError> {
        self.users
            .write()
            .map_err(|_| StoreError::Unavailable("user store lock poisoned".into()))
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_candidates(&self, filter: &CandidateFilter) -> Result<Vec<UserRecord>, StoreError> {
        let users = self.read()?;
        Ok(users
            .iter()
            .filter(|u| filter.exclude_user_id.as_deref() != Some(u.id.as_str()))
            .cloned()
            .collect())
    }

    async fn update_location(&self, user_id: &str, update: &LocationUpdate) -> Result<(), StoreError> {
        let mut users = self.write()?;
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| StoreError::NotFound(format!("User {}", user_id)))?;

        user.coords = Some(update.coords.clone());
        user.location = Some(update.location.clone());
        user.last_location_update = Some(update.last_location_update);

        Ok(())
    }

    async fn sample_one(&self) -> Result<Option<UserRecord>, StoreError> {
        let users = self.read()?;
        Ok(users.choose(&mut rand::thread_rng()).cloned())
    }
}
