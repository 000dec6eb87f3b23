use crate::domain::entities::Notification;
use crate::domain::errors::StoreResult;

/// Durable keyed storage of notifications
///
/// Implementations must make every single-record write atomic: a concurrent
/// reader sees either the old or the new record, never a mix of both.
#[async_trait::async_trait]
pub trait NotificationStore: Send + Sync {
    /// All notifications owned by a user, in insertion order. Empty if none.
    async fn find_by_user(&self, user_id: i64) -> StoreResult<Vec<Notification>>;

    /// Notifications owned by a user that have not been read yet
    async fn find_unread_by_user(&self, user_id: i64) -> StoreResult<Vec<Notification>>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Notification>>;

    /// Upsert a single record and return what was committed
    async fn save(&self, notification: Notification) -> StoreResult<Notification>;

    /// Upsert a batch. Returns only once every record is durable; on error the
    /// caller must assume none of them were written.
    async fn save_all(&self, notifications: Vec<Notification>) -> StoreResult<()>;
}
