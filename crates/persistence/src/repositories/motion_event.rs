//! Motion event repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::MotionEventEntity;

/// Input for persisting a motion sample.
#[derive(Debug, Clone)]
pub struct MotionEventInput {
    pub owner_id: Uuid,
    pub device_id: i64,
    /// Event time; None means ingestion time.
    pub timestamp: Option<DateTime<Utc>>,
    pub magnitude: f64,
    pub note: String,
}

/// Repository for motion-event database operations.
///
/// Events are append-only; rows disappear with their device via cascade.
#[derive(Clone)]
pub struct MotionEventRepository {
    pool: PgPool,
}

impl MotionEventRepository {
    /// Creates a new MotionEventRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a motion event row.
    pub async fn insert(&self, input: MotionEventInput) -> Result<MotionEventEntity, sqlx::Error> {
        let timestamp = input.timestamp.unwrap_or_else(Utc::now);

        sqlx::query_as::<_, MotionEventEntity>(
            r#"
            INSERT INTO motion_events (owner_id, device_id, timestamp, magnitude, note)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, owner_id, device_id, timestamp, magnitude, note
            "#,
        )
        .bind(input.owner_id)
        .bind(input.device_id)
        .bind(timestamp)
        .bind(input.magnitude)
        .bind(&input.note)
        .fetch_one(&self.pool)
        .await
    }

    /// All motion events owned by a user, newest first.
    pub async fn find_by_owner(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<MotionEventEntity>, sqlx::Error> {
        sqlx::query_as::<_, MotionEventEntity>(
            r#"
            SELECT id, owner_id, device_id, timestamp, magnitude, note
            FROM motion_events
            WHERE owner_id = $1
            ORDER BY timestamp DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
    }
}
