//! Recording repository for database operations.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::RecordingEntity;

/// Input for persisting an uploaded clip.
///
/// `owner_id` must be the owning user of `device_id` at the time of the
/// upload; it is written once and never recomputed.
#[derive(Debug, Clone)]
pub struct RecordingInput {
    pub owner_id: Uuid,
    pub device_id: i64,
    pub file_path: String,
    pub duration_ms: i64,
}

/// Repository for recording-related database operations.
///
/// Recordings are created by upload ingestion only and are immutable, so
/// there are no update or delete operations here; rows disappear with their
/// device via cascade.
#[derive(Clone)]
pub struct RecordingRepository {
    pool: PgPool,
}

impl RecordingRepository {
    /// Creates a new RecordingRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a recording row.
    pub async fn insert(&self, input: RecordingInput) -> Result<RecordingEntity, sqlx::Error> {
        sqlx::query_as::<_, RecordingEntity>(
            r#"
            INSERT INTO recordings (owner_id, device_id, file_path, duration_ms, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, owner_id, device_id, file_path, duration_ms, created_at
            "#,
        )
        .bind(input.owner_id)
        .bind(input.device_id)
        .bind(&input.file_path)
        .bind(input.duration_ms)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
    }

    /// All recordings owned by a user, newest first.
    pub async fn find_by_owner(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<RecordingEntity>, sqlx::Error> {
        sqlx::query_as::<_, RecordingEntity>(
            r#"
            SELECT id, owner_id, device_id, file_path, duration_ms, created_at
            FROM recordings
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
    }
}
