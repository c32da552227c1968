use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use std::time::Duration;
use crate::models::{CandidateFilter, GeoPoint, LocationUpdate, UserRecord};
use super::store::{StoreError, UserStore};

const USER_COLUMNS: &str = r#"
    id, name, headline, profile_image, location, coords, is_anonymous, last_location_update
"#;

/// Row shape of the `users` table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: String,
    name: Option<String>,
    headline: Option<String>,
    profile_image: Option<String>,
    location: Option<String>,
    coords: Option<Json<Value>>,
    is_anonymous: Option<bool>,
    last_location_update: Option<DateTime<Utc>>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            headline: row.headline,
            profile_image: row.profile_image,
            location: row.location,
            coords: row.coords.and_then(|Json(value)| GeoPoint::from_value(value)),
            is_anonymous: row.is_anonymous,
            last_location_update: row.last_location_update,
        }
    }
}

/// PostgreSQL-backed user store
///
/// Expects a `users` table with columns `id TEXT PRIMARY KEY`, `name`,
/// `headline`, `profile_image`, `location` (TEXT), `coords` (JSONB GeoJSON
/// point), `is_anonymous` (BOOLEAN) and `last_location_update` (TIMESTAMPTZ).
/// Schema management lives outside this service.
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    /// Create a new store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL user store");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
        )
        .await
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn find_candidates(&self, filter: &CandidateFilter) -> Result<Vec<UserRecord>, StoreError> {
        let query = format!(
            "SELECT {} FROM users WHERE ($1::text IS NULL OR id <> $1)",
            USER_COLUMNS
        );

        let rows: Vec<UserRow> = sqlx::query_as(&query)
            .bind(filter.exclude_user_id.as_deref())
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!("Fetched {} candidate users", rows.len());

        Ok(rows.into_iter().map(UserRecord::from).collect())
    }

    async fn update_location(&self, user_id: &str, update: &LocationUpdate) -> Result<(), StoreError> {
        let query = r#"
            UPDATE users
            SET coords = $2, location = $3, last_location_update = $4
            WHERE id = $1
        "#;

        let result = sqlx::query(query)
            .bind(user_id)
            .bind(Json(&update.coords))
            .bind(&update.location)
            .bind(update.last_location_update)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("User {}", user_id)));
        }

        tracing::debug!("Updated location for user {}", user_id);

        Ok(())
    }

    async fn sample_one(&self) -> Result<Option<UserRecord>, StoreError> {
        let query = format!("SELECT {} FROM users ORDER BY random() LIMIT 1", USER_COLUMNS);

        let row: Option<UserRow> = sqlx::query_as(&query)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(UserRecord::from))
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
