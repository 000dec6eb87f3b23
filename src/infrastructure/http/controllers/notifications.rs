use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    domain::entities::NotificationView,
    infrastructure::http::middleware::{ApiResult, AppState},
};

/// List notifications for a user. Users without notifications get `[]`.
pub async fn list_notifications(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Vec<NotificationView>>> {
    let notifications = state.notification_service.list(user_id).await?;
    Ok(Json(notifications))
}

/// Mark a notification as read
pub async fn mark_notification_as_read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if let Err(e) = state.notification_service.mark_one_read(id).await {
        tracing::error!("Failed to mark notification with ID {}: {}", id, e);
        return Err(e.into());
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Mark all notifications as read for a user.
///
/// Succeeds with 204 even when nothing was unread.
pub async fn mark_all_notifications_as_read(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<StatusCode> {
    if let Err(e) = state.notification_service.mark_all_read(user_id).await {
        tracing::error!(
            "Failed to mark all notifications for user ID {}: {}",
            user_id,
            e
        );
        return Err(e.into());
    }

    Ok(StatusCode::NO_CONTENT)
}
