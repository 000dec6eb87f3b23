use sqlx::{any::AnyRow, Row};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::domain::entities::Notification;
use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::ports::NotificationStore;

use super::Database;

const UPSERT_NOTIFICATION: &str =
    "INSERT INTO notifications (id, user_id, film_id, message, created_at, is_read)
     VALUES (?, ?, ?, ?, ?, ?)
     ON CONFLICT(id) DO UPDATE SET is_read = excluded.is_read
     RETURNING id, user_id, film_id, message, created_at, is_read";

/// Column values of a row in the `notifications` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRecord {
    pub id: i64,
    pub user_id: i64,
    pub film_id: i64,
    pub message: String,
    pub created_at: String,
    pub is_read: i64,
}

impl NotificationRecord {
    pub fn from_row(row: &AnyRow) -> StoreResult<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            film_id: row.try_get("film_id")?,
            message: row.try_get("message")?,
            created_at: row.try_get("created_at")?,
            is_read: row.try_get("is_read")?,
        })
    }
}

impl TryFrom<NotificationRecord> for Notification {
    type Error = StoreError;

    fn try_from(record: NotificationRecord) -> StoreResult<Self> {
        let created_at = OffsetDateTime::parse(&record.created_at, &Rfc3339).map_err(|e| {
            StoreError::Mapping(format!(
                "notification {} has invalid created_at {:?}: {}",
                record.id, record.created_at, e
            ))
        })?;

        let is_read = match record.is_read {
            0 => false,
            1 => true,
            other => {
                return Err(StoreError::Mapping(format!(
                    "notification {} has invalid is_read value {}",
                    record.id, other
                )))
            }
        };

        Ok(Notification {
            id: record.id,
            user_id: record.user_id,
            film_id: record.film_id,
            message: record.message,
            created_at,
            is_read,
        })
    }
}

impl TryFrom<&Notification> for NotificationRecord {
    type Error = StoreError;

    fn try_from(notification: &Notification) -> StoreResult<Self> {
        let created_at = notification.created_at.format(&Rfc3339).map_err(|e| {
            StoreError::Mapping(format!(
                "notification {} created_at cannot be formatted: {}",
                notification.id, e
            ))
        })?;

        Ok(Self {
            id: notification.id,
            user_id: notification.user_id,
            film_id: notification.film_id,
            message: notification.message.clone(),
            created_at,
            is_read: i64::from(notification.is_read),
        })
    }
}

/// Map a `notifications` row to a domain notification
pub fn notification_from_row(row: &AnyRow) -> StoreResult<Notification> {
    Notification::try_from(NotificationRecord::from_row(row)?)
}

fn upsert_query(
    record: &NotificationRecord,
) -> sqlx::query::Query<'_, sqlx::Any, sqlx::any::AnyArguments<'_>> {
    sqlx::query(UPSERT_NOTIFICATION)
        .bind(record.id)
        .bind(record.user_id)
        .bind(record.film_id)
        .bind(&record.message)
        .bind(&record.created_at)
        .bind(record.is_read)
}

impl Database {
    /// Insert a brand new notification. Fails if the id is already taken.
    pub async fn create_notification(&self, notification: &Notification) -> StoreResult<()> {
        let record = NotificationRecord::try_from(notification)?;

        sqlx::query(
            "INSERT INTO notifications (id, user_id, film_id, message, created_at, is_read)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(record.film_id)
        .bind(&record.message)
        .bind(&record.created_at)
        .bind(record.is_read)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl NotificationStore for Database {
    async fn find_by_user(&self, user_id: i64) -> StoreResult<Vec<Notification>> {
        let rows = sqlx::query(
            "SELECT id, user_id, film_id, message, created_at, is_read
             FROM notifications
             WHERE user_id = ?
             ORDER BY id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(notification_from_row).collect()
    }

    async fn find_unread_by_user(&self, user_id: i64) -> StoreResult<Vec<Notification>> {
        let rows = sqlx::query(
            "SELECT id, user_id, film_id, message, created_at, is_read
             FROM notifications
             WHERE user_id = ? AND is_read = 0
             ORDER BY id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(notification_from_row).collect()
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Notification>> {
        let row = sqlx::query(
            "SELECT id, user_id, film_id, message, created_at, is_read
             FROM notifications
             WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(notification_from_row).transpose()
    }

    async fn save(&self, notification: Notification) -> StoreResult<Notification> {
        let record = NotificationRecord::try_from(&notification)?;

        // Drain every row so the statement completes and the write commits
        let rows = upsert_query(&record).fetch_all(&self.pool).await?;
        let row = rows.first().ok_or_else(|| {
            StoreError::Mapping(format!("upsert of notification {} returned no row", record.id))
        })?;

        notification_from_row(row)
    }

    async fn save_all(&self, notifications: Vec<Notification>) -> StoreResult<()> {
        if notifications.is_empty() {
            return Ok(());
        }

        let records = notifications
            .iter()
            .map(NotificationRecord::try_from)
            .collect::<StoreResult<Vec<_>>>()?;

        // Dropping the transaction on error rolls the whole batch back
        let mut tx = self.pool.begin().await?;
        for record in &records {
            upsert_query(record).execute(&mut *tx).await?;
        }
        tx.commit().await?;

        tracing::debug!("Committed batch of {} notifications", records.len());
        Ok(())
    }
}
