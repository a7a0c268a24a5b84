//! Handlers for the authenticated `/v1/notifications` feed.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use dealdash_core::error::CoreError;
use dealdash_core::types::DbId;
use dealdash_db::models::notification::NotificationWithOffer;
use dealdash_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/notifications -- the caller's notifications, newest first.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Vec<NotificationWithOffer>>> {
    let notifications = NotificationRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(notifications))
}

/// POST /api/v1/notifications/{id}/read -- mark one of the caller's
/// notifications as read.
///
/// Scoped to the owner: another user's notification id yields 404, not a
/// cross-user write.
pub async fn mark_read(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if NotificationRepo::mark_read(&state.pool, id, auth_user.user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }))
    }
}
