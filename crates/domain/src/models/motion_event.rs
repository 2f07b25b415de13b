//! Motion event domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A detected motion sample. Immutable after creation; `owner_id` is a
/// write-time copy of the device's owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionEvent {
    pub id: i64,
    pub owner_id: Uuid,
    pub device_id: i64,
    pub timestamp: DateTime<Utc>,
    pub magnitude: f64,
    pub note: String,
}

/// Motion ingestion payload.
///
/// Magnitude and note are deliberately permissive: missing magnitude is 0.0,
/// missing note is empty, and no range check is applied. The caller may supply
/// an event timestamp; otherwise ingestion time is used.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMotionEventRequest {
    #[serde(default)]
    pub magnitude: f64,

    #[serde(default)]
    #[validate(length(max = 200, message = "Note must be at most 200 characters"))]
    pub note: String,

    pub timestamp: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_defaults() {
        let request: CreateMotionEventRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.magnitude, 0.0);
        assert_eq!(request.note, "");
        assert!(request.timestamp.is_none());
    }

    #[test]
    fn test_full_body() {
        let request: CreateMotionEventRequest = serde_json::from_str(
            r#"{"magnitude": 2.5, "note": "hallway", "timestamp": "2025-03-14T09:26:53Z"}"#,
        )
        .unwrap();
        assert_eq!(request.magnitude, 2.5);
        assert_eq!(request.note, "hallway");
        assert!(request.timestamp.is_some());
    }

    #[test]
    fn test_negative_magnitude_accepted() {
        // Observed behavior is permissive; values are stored as supplied.
        let request: CreateMotionEventRequest =
            serde_json::from_str(r#"{"magnitude": -1.5}"#).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.magnitude, -1.5);
    }

    #[test]
    fn test_note_too_long() {
        let request = CreateMotionEventRequest {
            magnitude: 1.0,
            note: "x".repeat(201),
            timestamp: None,
        };
        assert!(request.validate().is_err());
    }
}
