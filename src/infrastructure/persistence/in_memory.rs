use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::Notification;
use crate::domain::errors::StoreResult;
use crate::domain::ports::NotificationStore;

/// In-memory implementation of NotificationStore keyed by notification id
///
/// Upserts follow the SQL store: an existing record only has its read flag
/// replaced, the immutable fields keep their stored values.
#[derive(Clone)]
pub struct InMemoryNotificationStore {
    notifications: Arc<RwLock<BTreeMap<i64, Notification>>>,
}

impl InMemoryNotificationStore {
    pub fn new() -> Self {
        Self {
            notifications: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    pub fn with_notifications(notifications: impl IntoIterator<Item = Notification>) -> Self {
        let map: BTreeMap<i64, Notification> =
            notifications.into_iter().map(|n| (n.id, n)).collect();
        Self {
            notifications: Arc::new(RwLock::new(map)),
        }
    }

    /// Number of stored notifications
    pub async fn len(&self) -> usize {
        self.notifications.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.notifications.read().await.is_empty()
    }

    fn upsert(map: &mut BTreeMap<i64, Notification>, notification: Notification) -> Notification {
        let is_read = notification.is_read;
        let committed = map
            .entry(notification.id)
            .and_modify(|existing| existing.is_read = is_read)
            .or_insert(notification);
        committed.clone()
    }
}

impl Default for InMemoryNotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationStore for InMemoryNotificationStore {
    async fn find_by_user(&self, user_id: i64) -> StoreResult<Vec<Notification>> {
        let notifications = self.notifications.read().await;
        Ok(notifications
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_unread_by_user(&self, user_id: i64) -> StoreResult<Vec<Notification>> {
        let notifications = self.notifications.read().await;
        Ok(notifications
            .values()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Notification>> {
        let notifications = self.notifications.read().await;
        Ok(notifications.get(&id).cloned())
    }

    async fn save(&self, notification: Notification) -> StoreResult<Notification> {
        let mut notifications = self.notifications.write().await;
        Ok(Self::upsert(&mut notifications, notification))
    }

    async fn save_all(&self, batch: Vec<Notification>) -> StoreResult<()> {
        let mut notifications = self.notifications.write().await;
        for notification in batch {
            Self::upsert(&mut notifications, notification);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn notification(id: i64, user_id: i64, is_read: bool) -> Notification {
        let mut n = Notification::new(
            id,
            user_id,
            100 + id,
            format!("Film {} is out", id),
            datetime!(2024-05-01 10:00 UTC),
        );
        n.is_read = is_read;
        n
    }

    #[tokio::test]
    async fn test_find_by_user_returns_only_owned_in_id_order() {
        let store = InMemoryNotificationStore::with_notifications(vec![
            notification(3, 7, false),
            notification(1, 7, true),
            notification(2, 9, false),
        ]);

        let found = store.find_by_user(7).await.unwrap();
        let ids: Vec<i64> = found.iter().map(|n| n.id).collect();

        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_find_unread_by_user_skips_read() {
        let store = InMemoryNotificationStore::with_notifications(vec![
            notification(1, 7, false),
            notification(2, 7, true),
        ]);

        let unread = store.find_unread_by_user(7).await.unwrap();

        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0].id, 1);
    }

    #[tokio::test]
    async fn test_unknown_user_yields_empty() {
        let store = InMemoryNotificationStore::new();

        assert!(store.find_by_user(1).await.unwrap().is_empty());
        assert!(store.find_unread_by_user(1).await.unwrap().is_empty());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_save_only_replaces_read_flag() {
        let store = InMemoryNotificationStore::with_notifications(vec![notification(1, 7, false)]);

        let mut changed = notification(1, 7, true);
        changed.message = "rewritten".to_string();
        let committed = store.save(changed).await.unwrap();

        assert!(committed.is_read);
        assert_eq!(committed.message, "Film 1 is out");
        assert_eq!(store.find_by_id(1).await.unwrap(), Some(committed));
    }

    #[tokio::test]
    async fn test_save_inserts_missing_record() {
        let store = InMemoryNotificationStore::new();

        store.save(notification(5, 7, false)).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert!(store.find_by_id(5).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_save_all_applies_every_record() {
        let store = InMemoryNotificationStore::with_notifications(vec![
            notification(1, 7, false),
            notification(2, 7, false),
        ]);

        store
            .save_all(vec![notification(1, 7, true), notification(2, 7, true)])
            .await
            .unwrap();

        assert!(store.find_unread_by_user(7).await.unwrap().is_empty());
    }
}
