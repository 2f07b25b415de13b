//! Recording entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the recordings table.
#[derive(Debug, Clone, FromRow)]
pub struct RecordingEntity {
    pub id: i64,
    pub owner_id: Uuid,
    pub device_id: i64,
    pub file_path: String,
    pub duration_ms: i64,
    pub created_at: DateTime<Utc>,
}

impl From<RecordingEntity> for domain::models::Recording {
    fn from(entity: RecordingEntity) -> Self {
        Self {
            id: entity.id,
            owner_id: entity.owner_id,
            device_id: entity.device_id,
            file_path: entity.file_path,
            duration_ms: entity.duration_ms,
            created_at: entity.created_at,
        }
    }
}
