//! Motion event entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the motion_events table.
#[derive(Debug, Clone, FromRow)]
pub struct MotionEventEntity {
    pub id: i64,
    pub owner_id: Uuid,
    pub device_id: i64,
    pub timestamp: DateTime<Utc>,
    pub magnitude: f64,
    pub note: String,
}

impl From<MotionEventEntity> for domain::models::MotionEvent {
    fn from(entity: MotionEventEntity) -> Self {
        Self {
            id: entity.id,
            owner_id: entity.owner_id,
            device_id: entity.device_id,
            timestamp: entity.timestamp,
            magnitude: entity.magnitude,
            note: entity.note,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_event_entity_to_domain() {
        let entity = MotionEventEntity {
            id: 9,
            owner_id: Uuid::new_v4(),
            device_id: 4,
            timestamp: Utc::now(),
            magnitude: 2.5,
            note: "hallway".to_string(),
        };
        let event: domain::models::MotionEvent = entity.clone().into();
        assert_eq!(event.id, 9);
        assert_eq!(event.magnitude, 2.5);
        assert_eq!(event.note, "hallway");
    }
}
