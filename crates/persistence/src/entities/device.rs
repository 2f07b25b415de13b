//! Device entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the devices table.
#[derive(Debug, Clone, FromRow)]
pub struct DeviceEntity {
    pub id: i64,
    pub owner_id: Uuid,
    pub name: String,
    pub token: String,
    pub is_online: bool,
    pub recording_enabled: bool,
    pub last_seen: Option<DateTime<Utc>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DeviceEntity> for domain::models::Device {
    fn from(entity: DeviceEntity) -> Self {
        Self {
            id: entity.id,
            owner_id: entity.owner_id,
            name: entity.name,
            token: entity.token,
            is_online: entity.is_online,
            recording_enabled: entity.recording_enabled,
            last_seen: entity.last_seen,
            latitude: entity.latitude,
            longitude: entity.longitude,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_entity() -> DeviceEntity {
        DeviceEntity {
            id: 1,
            owner_id: Uuid::new_v4(),
            name: "Hall Cam".to_string(),
            token: "a".repeat(24),
            is_online: false,
            recording_enabled: true,
            last_seen: None,
            latitude: Some(48.1486),
            longitude: Some(17.1077),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_device_entity_to_domain() {
        let entity = test_entity();
        let device: domain::models::Device = entity.clone().into();

        assert_eq!(device.id, entity.id);
        assert_eq!(device.owner_id, entity.owner_id);
        assert_eq!(device.name, entity.name);
        assert_eq!(device.token, entity.token);
        assert_eq!(device.recording_enabled, entity.recording_enabled);
        assert_eq!(device.latitude, entity.latitude);
        assert_eq!(device.longitude, entity.longitude);
    }

    #[test]
    fn test_device_entity_nullable_fields() {
        let mut entity = test_entity();
        entity.latitude = None;
        entity.longitude = None;
        entity.last_seen = None;

        let device: domain::models::Device = entity.into();
        assert!(device.latitude.is_none());
        assert!(device.longitude.is_none());
        assert!(device.last_seen.is_none());
    }
}
