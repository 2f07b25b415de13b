//! Camera ingestion routes.
//!
//! Every endpoint here is keyed by the device token path parameter. The token
//! is the only credential a phone carries; a token that resolves to nothing
//! answers 404 regardless of why.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use chrono::Utc;
use persistence::repositories::{
    DeviceRepository, MotionEventInput, MotionEventRepository, PairingClaimRepository,
    RecordingInput, RecordingRepository, UserRepository,
};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::OptionalUserAuth;
use crate::middleware::metrics::{record_motion_event, record_recording_uploaded};
use domain::models::device::{
    DeviceStatusResponse, LocationResponse, OkResponse, UpdateLocationRequest, DEFAULT_DEVICE_NAME,
};
use domain::models::motion_event::CreateMotionEventRequest;
use domain::models::PendingClaim;
use domain::models::recording::{recording_path, UploadRecordingResponse};
use domain::services::MotionAlert;
use domain::token::is_well_formed_token;

/// Record a device heartbeat.
///
/// POST /api/v1/camera/:token/heartbeat
///
/// For a known token this is a liveness update. For an unknown token with a
/// pending claim from the caller's session carrying this exact token, the
/// device is materialized atomically and the claim consumed; concurrent
/// duplicate heartbeats still produce exactly one device row because the
/// unique token constraint arbitrates.
pub async fn heartbeat(
    State(state): State<AppState>,
    Path(token): Path<String>,
    auth: OptionalUserAuth,
) -> Result<Json<OkResponse>, ApiError> {
    if !is_well_formed_token(&token) {
        return Err(ApiError::unknown_device());
    }

    let now = Utc::now();
    let devices = DeviceRepository::new(state.pool.clone());

    if devices.mark_online(&token, now).await?.is_some() {
        return Ok(Json(OkResponse::ok()));
    }

    // Unknown token: only an authenticated caller with a matching pending
    // claim may materialize the device.
    let auth = match auth.0 {
        Some(auth) => auth,
        None => return Err(ApiError::unknown_device()),
    };

    let claims = PairingClaimRepository::new(state.pool.clone());
    let claim = match claims.find_by_session(&auth.session_id).await? {
        Some(entity) => PendingClaim::from(entity),
        None => return Err(ApiError::unknown_device()),
    };
    if !claim.matches(&token) {
        return Err(ApiError::unknown_device());
    }

    let device = devices
        .create_claimed(claim.user_id, DEFAULT_DEVICE_NAME, &token, now)
        .await?;
    claims.delete(&auth.session_id).await?;

    tracing::info!(
        device_id = device.id,
        owner_id = %device.owner_id,
        "Device materialized from pending claim"
    );

    Ok(Json(OkResponse::ok()))
}

/// Poll the device's recording switch.
///
/// GET /api/v1/camera/:token/status
pub async fn get_status(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<DeviceStatusResponse>, ApiError> {
    let device = find_device(&state, &token).await?;

    Ok(Json(DeviceStatusResponse {
        recording_enabled: device.recording_enabled,
    }))
}

/// Read the device's last reported location.
///
/// GET /api/v1/camera/:token/location
pub async fn get_location(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<LocationResponse>, ApiError> {
    let device = find_device(&state, &token).await?;

    Ok(Json(LocationResponse {
        lat: device.latitude,
        lon: device.longitude,
    }))
}

/// Overwrite the device's location.
///
/// POST /api/v1/camera/:token/location
///
/// Both fields are written unconditionally; a missing field clears the
/// stored value. No range validation, last writer wins.
pub async fn update_location(
    State(state): State<AppState>,
    Path(token): Path<String>,
    request: Option<Json<UpdateLocationRequest>>,
) -> Result<Json<OkResponse>, ApiError> {
    if !is_well_formed_token(&token) {
        return Err(ApiError::unknown_device());
    }

    let request = request.map(|Json(r)| r).unwrap_or_default();

    let devices = DeviceRepository::new(state.pool.clone());
    let updated = devices
        .update_location(&token, request.lat, request.lon)
        .await?;

    if updated == 0 {
        return Err(ApiError::unknown_device());
    }

    Ok(Json(OkResponse::ok()))
}

/// Ingest an uploaded video clip.
///
/// POST /api/v1/camera/:token/upload (multipart: video, duration_ms)
///
/// The clip is stored under the deterministic path policy and a recording
/// row is written with the device owner's id. `duration_ms` is parsed
/// leniently: absent or unparseable values become 0, never an error.
pub async fn upload_recording(
    State(state): State<AppState>,
    Path(token): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<UploadRecordingResponse>, ApiError> {
    let device = find_device(&state, &token).await?;

    let mut video: Option<(String, Vec<u8>)> = None;
    let mut duration_ms: i64 = 0;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Malformed multipart body: {}", e)))?
    {
        match field.name() {
            Some("video") => {
                let filename = field.file_name().unwrap_or("clip").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Validation(format!("Failed to read clip: {}", e)))?;
                video = Some((filename, bytes.to_vec()));
            }
            Some("duration_ms") => {
                let text = field.text().await.unwrap_or_default();
                duration_ms = text.trim().parse().unwrap_or(0);
            }
            _ => {}
        }
    }

    let (filename, body) = video.ok_or_else(|| {
        ApiError::Validation("Missing video file in upload".to_string())
    })?;

    let relative_path = recording_path(device.id, &filename, Utc::now());
    state
        .store
        .store(&relative_path, &body)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to store clip: {}", e)))?;

    let recordings = RecordingRepository::new(state.pool.clone());
    let recording = recordings
        .insert(RecordingInput {
            owner_id: device.owner_id,
            device_id: device.id,
            file_path: relative_path.clone(),
            duration_ms,
        })
        .await?;

    record_recording_uploaded(body.len());
    tracing::info!(
        recording_id = recording.id,
        device_id = device.id,
        bytes = body.len(),
        duration_ms = duration_ms,
        "Recording stored"
    );

    Ok(Json(UploadRecordingResponse {
        ok: true,
        id: recording.id,
        url: state.store.public_url(&relative_path),
    }))
}

/// Ingest a motion event and dispatch the owner alert.
///
/// POST /api/v1/camera/:token/motion
///
/// The alert email runs in a spawned task; whatever happens to it, the
/// ingestion response is already {ok:true}.
pub async fn record_motion(
    State(state): State<AppState>,
    Path(token): Path<String>,
    request: Option<Json<CreateMotionEventRequest>>,
) -> Result<Json<OkResponse>, ApiError> {
    let device = find_device(&state, &token).await?;

    let request = request.map(|Json(r)| r).unwrap_or_default();
    request.validate()?;

    let events = MotionEventRepository::new(state.pool.clone());
    let event = events
        .insert(MotionEventInput {
            owner_id: device.owner_id,
            device_id: device.id,
            timestamp: request.timestamp,
            magnitude: request.magnitude,
            note: request.note,
        })
        .await?;

    record_motion_event();

    let alert = MotionAlert {
        device_name: device.name.clone(),
        magnitude: event.magnitude,
        timestamp: event.timestamp,
    };
    let notifier = state.notifier.clone();
    let users = UserRepository::new(state.pool.clone());
    let owner_id = device.owner_id;

    tokio::spawn(async move {
        use domain::services::NotificationResult;

        let recipient = match users.find_by_id(owner_id).await {
            Ok(user) => user.and_then(|u| u.email),
            Err(e) => {
                tracing::warn!(owner_id = %owner_id, "Owner lookup for alert failed: {}", e);
                None
            }
        };

        match notifier.notify_motion(recipient.as_deref(), &alert).await {
            NotificationResult::Sent => {
                tracing::info!(owner_id = %owner_id, "Motion alert sent")
            }
            NotificationResult::NoRecipient | NotificationResult::Disabled => {}
            NotificationResult::Failed(reason) => {
                tracing::warn!(owner_id = %owner_id, "Motion alert failed: {}", reason)
            }
        }
    });

    Ok(Json(OkResponse::ok()))
}

/// Resolve a token to its device, or the canonical 404.
async fn find_device(
    state: &AppState,
    token: &str,
) -> Result<persistence::entities::DeviceEntity, ApiError> {
    if !is_well_formed_token(token) {
        return Err(ApiError::unknown_device());
    }

    let devices = DeviceRepository::new(state.pool.clone());
    devices
        .find_by_token(token)
        .await?
        .ok_or_else(ApiError::unknown_device)
}
