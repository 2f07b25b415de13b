//! Owner-facing motion event listings.

use axum::{extract::State, Json};
use persistence::repositories::MotionEventRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use domain::models::MotionEvent;

/// List the caller's motion events, newest first.
///
/// GET /api/v1/motion-events
pub async fn list_motion_events(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<Json<Vec<MotionEvent>>, ApiError> {
    let repo = MotionEventRepository::new(state.pool.clone());
    let events = repo.find_by_owner(user_auth.user_id).await?;

    Ok(Json(events.into_iter().map(MotionEvent::from).collect()))
}
