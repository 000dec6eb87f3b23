use std::sync::Arc;

use crate::domain::entities::NotificationView;
use crate::domain::errors::{NotificationError, NotificationResult};
use crate::domain::ports::NotificationStore;

/// Counter of notifications moved from unread to read
pub const NOTIFICATIONS_MARKED_READ: &str = "notifications_marked_read_total";
/// Counter of mark requests naming an unknown notification
pub const NOTIFICATIONS_NOT_FOUND: &str = "notifications_not_found_total";

/// Read-state transitions for user notifications
///
/// Holds no cache and no locks. Every write only ever moves a record from
/// unread to read, so consistency rests on the store's per-record atomicity.
#[derive(Clone)]
pub struct NotificationService {
    store: Arc<dyn NotificationStore>,
}

impl NotificationService {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// List every notification of a user. An unknown user simply has none.
    pub async fn list(&self, user_id: i64) -> NotificationResult<Vec<NotificationView>> {
        tracing::info!("Fetching notifications for user ID: {}", user_id);

        let notifications = self.store.find_by_user(user_id).await?;
        let views: Vec<NotificationView> = notifications
            .into_iter()
            .map(NotificationView::from)
            .collect();

        tracing::debug!(
            "Retrieved {} notifications for user ID: {}",
            views.len(),
            user_id
        );
        Ok(views)
    }

    /// Mark a single notification as read. Marking it again is a no-op success.
    pub async fn mark_one_read(&self, notification_id: i64) -> NotificationResult<()> {
        tracing::info!("Marking notification with ID {} as read", notification_id);

        let mut notification = match self.store.find_by_id(notification_id).await? {
            Some(notification) => notification,
            None => {
                tracing::warn!("Notification with ID {} not found", notification_id);
                metrics::counter!(NOTIFICATIONS_NOT_FOUND).increment(1);
                return Err(NotificationError::NotFound(notification_id));
            }
        };

        let transitioned = notification.mark_read();
        self.store.save(notification).await?;
        if transitioned {
            metrics::counter!(NOTIFICATIONS_MARKED_READ).increment(1);
        }

        tracing::debug!("Marked notification with ID {} as read", notification_id);
        Ok(())
    }

    /// Mark every unread notification of a user as read.
    ///
    /// Returns how many records were unread at lookup and got marked; zero
    /// is a valid outcome.
    pub async fn mark_all_read(&self, user_id: i64) -> NotificationResult<usize> {
        tracing::info!("Marking all notifications as read for user ID: {}", user_id);

        let mut unread = self.store.find_unread_by_user(user_id).await?;
        let count = unread
            .iter_mut()
            .map(|n| n.mark_read())
            .filter(|transitioned| *transitioned)
            .count();

        self.store.save_all(unread).await?;
        metrics::counter!(NOTIFICATIONS_MARKED_READ).increment(count as u64);

        tracing::debug!(
            "Marked {} notifications as read for user ID: {}",
            count,
            user_id
        );
        Ok(count)
    }
}
