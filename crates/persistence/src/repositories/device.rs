//! Device repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::DeviceEntity;

/// Postgres error code for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Returns true if the error is a unique-constraint violation.
///
/// The pairing flow retries token generation on this error; the heartbeat
/// claim path treats it as "someone else already created the device".
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
    )
}

/// Repository for device-related database operations.
#[derive(Clone)]
pub struct DeviceRepository {
    pool: PgPool,
}

impl DeviceRepository {
    /// Creates a new DeviceRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a device by its bearer token.
    pub async fn find_by_token(&self, token: &str) -> Result<Option<DeviceEntity>, sqlx::Error> {
        sqlx::query_as::<_, DeviceEntity>(
            r#"
            SELECT id, owner_id, name, token, is_online, recording_enabled,
                   last_seen, latitude, longitude, created_at, updated_at
            FROM devices
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
    }

    /// Find a device by its id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<DeviceEntity>, sqlx::Error> {
        sqlx::query_as::<_, DeviceEntity>(
            r#"
            SELECT id, owner_id, name, token, is_online, recording_enabled,
                   last_seen, latitude, longitude, created_at, updated_at
            FROM devices
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// All devices owned by a user, newest first.
    pub async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<DeviceEntity>, sqlx::Error> {
        sqlx::query_as::<_, DeviceEntity>(
            r#"
            SELECT id, owner_id, name, token, is_online, recording_enabled,
                   last_seen, latitude, longitude, created_at, updated_at
            FROM devices
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Insert a new device for direct pairing.
    ///
    /// Fails with a unique violation when the token collides; callers are
    /// expected to regenerate the token and retry.
    pub async fn create(
        &self,
        owner_id: Uuid,
        name: &str,
        token: &str,
    ) -> Result<DeviceEntity, sqlx::Error> {
        let now = Utc::now();

        sqlx::query_as::<_, DeviceEntity>(
            r#"
            INSERT INTO devices (owner_id, name, token, is_online, recording_enabled, created_at, updated_at)
            VALUES ($1, $2, $3, false, false, $4, $4)
            RETURNING id, owner_id, name, token, is_online, recording_enabled,
                      last_seen, latitude, longitude, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .bind(token)
        .bind(now)
        .fetch_one(&self.pool)
        .await
    }

    /// Materialize a device from a pending claim, atomically.
    ///
    /// Check-and-create in a single statement: the unique constraint on token
    /// is the source of truth, so two concurrent heartbeats for the same
    /// freshly claimed token produce exactly one row. On conflict the existing
    /// row is reloaded and marked online instead.
    pub async fn create_claimed(
        &self,
        owner_id: Uuid,
        name: &str,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<DeviceEntity, sqlx::Error> {
        let inserted = sqlx::query_as::<_, DeviceEntity>(
            r#"
            INSERT INTO devices (owner_id, name, token, is_online, recording_enabled, last_seen, created_at, updated_at)
            VALUES ($1, $2, $3, true, false, $4, $4, $4)
            ON CONFLICT (token) DO NOTHING
            RETURNING id, owner_id, name, token, is_online, recording_enabled,
                      last_seen, latitude, longitude, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .bind(token)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        match inserted {
            Some(entity) => Ok(entity),
            // Lost the race: the device already exists, treat the heartbeat
            // as a liveness update on it.
            None => self
                .mark_online(token, now)
                .await?
                .ok_or(sqlx::Error::RowNotFound),
        }
    }

    /// Record a heartbeat: set is_online and advance last_seen.
    ///
    /// Returns None when no device carries the token.
    pub async fn mark_online(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<DeviceEntity>, sqlx::Error> {
        sqlx::query_as::<_, DeviceEntity>(
            r#"
            UPDATE devices
            SET is_online = true, last_seen = $2, updated_at = $2
            WHERE token = $1
            RETURNING id, owner_id, name, token, is_online, recording_enabled,
                      last_seen, latitude, longitude, created_at, updated_at
            "#,
        )
        .bind(token)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
    }

    /// Overwrite both location fields unconditionally (last writer wins).
    ///
    /// Returns the number of rows affected (0 if no device carries the token).
    pub async fn update_location(
        &self,
        token: &str,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE devices
            SET latitude = $2, longitude = $3, updated_at = $4
            WHERE token = $1
            "#,
        )
        .bind(token)
        .bind(latitude)
        .bind(longitude)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Flip recording_enabled for a device the caller owns.
    ///
    /// The ownership predicate is part of the UPDATE, so a device owned by
    /// someone else is indistinguishable from a missing one: both return None.
    pub async fn toggle_recording(
        &self,
        device_id: i64,
        owner_id: Uuid,
    ) -> Result<Option<bool>, sqlx::Error> {
        let row: Option<(bool,)> = sqlx::query_as(
            r#"
            UPDATE devices
            SET recording_enabled = NOT recording_enabled, updated_at = $3
            WHERE id = $1 AND owner_id = $2
            RETURNING recording_enabled
            "#,
        )
        .bind(device_id)
        .bind(owner_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|(enabled,)| enabled))
    }

    /// Hard delete a device.
    ///
    /// Relies on ON DELETE CASCADE for its recordings and motion events.
    /// Returns the number of rows deleted (0 or 1).
    pub async fn delete(&self, device_id: i64, owner_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM devices
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(device_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}
