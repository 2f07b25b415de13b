//! Owner-facing recording listings.

use axum::{extract::State, Json};
use persistence::repositories::RecordingRepository;
use serde::Serialize;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use domain::models::Recording;

/// A stored clip with its served URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingListItem {
    #[serde(flatten)]
    pub recording: Recording,
    pub url: String,
}

/// List the caller's recordings, newest first.
///
/// GET /api/v1/recordings
pub async fn list_recordings(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<Json<Vec<RecordingListItem>>, ApiError> {
    let repo = RecordingRepository::new(state.pool.clone());
    let recordings = repo.find_by_owner(user_auth.user_id).await?;

    let items = recordings
        .into_iter()
        .map(|entity| {
            let recording = Recording::from(entity);
            let url = state.store.public_url(&recording.file_path);
            RecordingListItem { recording, url }
        })
        .collect();

    Ok(Json(items))
}
