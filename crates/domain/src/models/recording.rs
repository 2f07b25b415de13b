//! Recording domain model and the stored-file path policy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// A video clip captured by a device. Immutable after creation.
///
/// `owner_id` is copied from the device's owner when the row is written and is
/// never recomputed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    pub id: i64,
    pub owner_id: Uuid,
    pub device_id: i64,
    pub file_path: String,
    pub duration_ms: i64,
    pub created_at: DateTime<Utc>,
}

/// Response for a successful clip upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRecordingResponse {
    pub ok: bool,
    pub id: i64,
    pub url: String,
}

/// Builds the storage path for an uploaded clip.
///
/// Shape: `videos/device_<device_id>/<YYYYMMDD_HHMMSS><ext>`, second
/// granularity, preserving the uploaded file's extension. Two uploads for the
/// same device within the same second map to the same path; the storage
/// backend's overwrite behavior governs the outcome (the local store
/// overwrites).
pub fn recording_path(device_id: i64, original_filename: &str, now: DateTime<Utc>) -> String {
    let ext = Path::new(original_filename)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{}", e))
        .unwrap_or_default();

    format!(
        "videos/device_{}/{}{}",
        device_id,
        now.format("%Y%m%d_%H%M%S"),
        ext
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    #[test]
    fn test_recording_path_shape() {
        let path = recording_path(42, "clip.webm", fixed_now());
        assert_eq!(path, "videos/device_42/20250314_092653.webm");
    }

    #[test]
    fn test_recording_path_preserves_extension() {
        let path = recording_path(1, "movie.MP4", fixed_now());
        assert_eq!(path, "videos/device_1/20250314_092653.MP4");
    }

    #[test]
    fn test_recording_path_without_extension() {
        let path = recording_path(1, "clip", fixed_now());
        assert_eq!(path, "videos/device_1/20250314_092653");
    }

    #[test]
    fn test_recording_path_drops_suspicious_extension() {
        let path = recording_path(1, "clip.we/bm", fixed_now());
        assert!(!path.contains("we/bm"), "{path}");
    }

    #[test]
    fn test_recording_path_same_second_collides() {
        let a = recording_path(3, "one.webm", fixed_now());
        let b = recording_path(3, "two.webm", fixed_now());
        assert_eq!(a, b);
    }
}
