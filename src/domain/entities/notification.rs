use serde::Serialize;
use time::OffsetDateTime;

/// A notification delivered to a user about a film.
///
/// Everything except `is_read` is fixed when the record is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub film_id: i64,
    pub message: String,
    pub created_at: OffsetDateTime,
    pub is_read: bool,
}

impl Notification {
    pub fn new(
        id: i64,
        user_id: i64,
        film_id: i64,
        message: impl Into<String>,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            user_id,
            film_id,
            message: message.into(),
            created_at,
            is_read: false,
        }
    }

    /// Flip the read flag. Already-read notifications stay read.
    ///
    /// Returns `true` only when the notification moved from unread to read.
    pub fn mark_read(&mut self) -> bool {
        let transitioned = !self.is_read;
        self.is_read = true;
        transitioned
    }
}

/// Read-only projection of a notification handed to callers
///
/// Serialized with camelCase keys; the read flag goes out as `reading`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    pub id: i64,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(rename = "reading")]
    pub is_read: bool,
    pub user_id: i64,
    pub film_id: i64,
}

impl From<&Notification> for NotificationView {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id,
            message: notification.message.clone(),
            created_at: notification.created_at,
            is_read: notification.is_read,
            user_id: notification.user_id,
            film_id: notification.film_id,
        }
    }
}

impl From<Notification> for NotificationView {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id,
            message: notification.message,
            created_at: notification.created_at,
            is_read: notification.is_read,
            user_id: notification.user_id,
            film_id: notification.film_id,
        }
    }
}
