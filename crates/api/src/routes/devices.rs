//! Owner-facing device endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use persistence::repositories::DeviceRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use domain::models::device::{DeviceSummary, ToggleRecordingResponse};
use domain::models::Device;

/// List the caller's devices.
///
/// GET /api/v1/devices
pub async fn list_devices(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<Json<Vec<DeviceSummary>>, ApiError> {
    let repo = DeviceRepository::new(state.pool.clone());
    let devices = repo.find_by_owner(user_auth.user_id).await?;

    let summaries = devices
        .into_iter()
        .map(|entity| DeviceSummary::from(Device::from(entity)))
        .collect();

    Ok(Json(summaries))
}

/// Flip a device's recording switch.
///
/// POST /api/v1/devices/:device_id/recording/toggle
///
/// Owner-gated. A device that does not exist and a device owned by someone
/// else both answer 404, so the endpoint leaks nothing about other users'
/// device ids.
pub async fn toggle_recording(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(device_id): Path<i64>,
) -> Result<Json<ToggleRecordingResponse>, ApiError> {
    let repo = DeviceRepository::new(state.pool.clone());

    let recording_enabled = repo
        .toggle_recording(device_id, user_auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Device not found".to_string()))?;

    tracing::info!(
        device_id = device_id,
        owner_id = %user_auth.user_id,
        recording_enabled = recording_enabled,
        "Recording toggled"
    );

    Ok(Json(ToggleRecordingResponse { recording_enabled }))
}

/// Delete a device the caller owns.
///
/// DELETE /api/v1/devices/:device_id
///
/// Recordings and motion events go with it via cascade; the stored clip
/// files remain on disk.
pub async fn delete_device(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Path(device_id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = DeviceRepository::new(state.pool.clone());

    let deleted = repo.delete(device_id, user_auth.user_id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Device not found".to_string()));
    }

    tracing::info!(
        device_id = device_id,
        owner_id = %user_auth.user_id,
        "Device deleted"
    );

    Ok(Json(serde_json::json!({ "ok": true })))
}
