//! Device domain model and camera wire payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Name given to devices materialized from a pending claim.
pub const DEFAULT_DEVICE_NAME: &str = "My Phone";

/// A paired physical device.
///
/// The token is an opaque bearer capability: whoever holds it can act as the
/// device on every camera endpoint. It is immutable after creation and unique
/// across all devices.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
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

/// Request payload for direct device pairing.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PairDeviceRequest {
    #[validate(length(max = 100, message = "Device name must be at most 100 characters"))]
    pub name: Option<String>,
}

impl PairDeviceRequest {
    /// Device name to persist, falling back to the default.
    pub fn device_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_DEVICE_NAME,
        }
    }
}

/// Generic acknowledgement body for camera ingestion calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Response for the device status poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatusResponse {
    pub recording_enabled: bool,
}

/// Current device location; both fields are null until the first write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationResponse {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Location write payload. Missing fields clear the stored value; no range
/// validation is applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLocationRequest {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Response for the owner-gated recording toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRecordingResponse {
    pub recording_enabled: bool,
}

/// Device summary for owner-facing listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSummary {
    pub id: i64,
    pub name: String,
    pub is_online: bool,
    pub recording_enabled: bool,
    pub last_seen: Option<DateTime<Utc>>,
}

impl From<Device> for DeviceSummary {
    fn from(device: Device) -> Self {
        Self {
            id: device.id,
            name: device.name,
            is_online: device.is_online,
            recording_enabled: device.recording_enabled,
            last_seen: device.last_seen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_request_default_name() {
        let request = PairDeviceRequest { name: None };
        assert_eq!(request.device_name(), DEFAULT_DEVICE_NAME);

        let request = PairDeviceRequest {
            name: Some(String::new()),
        };
        assert_eq!(request.device_name(), DEFAULT_DEVICE_NAME);
    }

    #[test]
    fn test_pair_request_explicit_name() {
        let request = PairDeviceRequest {
            name: Some("Garage Cam".to_string()),
        };
        assert_eq!(request.device_name(), "Garage Cam");
    }

    #[test]
    fn test_pair_request_name_too_long() {
        let request = PairDeviceRequest {
            name: Some("x".repeat(101)),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_pair_request_name_at_limit() {
        let request = PairDeviceRequest {
            name: Some("x".repeat(100)),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_location_deserializes_partial_body() {
        let request: UpdateLocationRequest = serde_json::from_str("{}").unwrap();
        assert!(request.lat.is_none());
        assert!(request.lon.is_none());

        let request: UpdateLocationRequest =
            serde_json::from_str(r#"{"lat": 48.15, "lon": 17.11}"#).unwrap();
        assert_eq!(request.lat, Some(48.15));
        assert_eq!(request.lon, Some(17.11));
    }

    #[test]
    fn test_device_summary_from_device() {
        let device = Device {
            id: 7,
            owner_id: Uuid::new_v4(),
            name: "Hall Cam".to_string(),
            token: "a".repeat(24),
            is_online: true,
            recording_enabled: false,
            last_seen: Some(Utc::now()),
            latitude: None,
            longitude: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let summary = DeviceSummary::from(device.clone());
        assert_eq!(summary.id, device.id);
        assert_eq!(summary.name, device.name);
        assert!(summary.is_online);
        assert!(!summary.recording_enabled);
    }
}
