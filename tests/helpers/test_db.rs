use film_notifications::infrastructure::persistence::Database;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use film_notifications::{Film, Notification, User};
use time::macros::datetime;
use uuid::Uuid;

/// Test database that deletes its SQLite files when dropped
pub struct TestDb {
    db: Database,
    path: PathBuf,
}

impl TestDb {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Deref for TestDb {
    type Target = Database;

    fn deref(&self) -> &Database {
        &self.db
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

pub async fn setup_test_db() -> TestDb {
    // File-backed SQLite, one file per test so tests can run in parallel
    let path = std::env::temp_dir().join(format!("notifications_test_{}.db", Uuid::new_v4()));
    let db_url = format!("sqlite://{}?mode=rwc", path.display());

    let db = Database::connect(&db_url, 5)
        .await
        .expect("Failed to connect to test database");

    db.run_migrations()
        .await
        .expect("Failed to run migrations on test database");

    TestDb { db, path }
}

pub async fn seed_user(db: &Database, id: i64) {
    db.create_user(&User { id })
        .await
        .expect("Failed to create test user");
}

pub async fn seed_film(db: &Database, id: i64) {
    db.create_film(&Film { id })
        .await
        .expect("Failed to create test film");
}

pub fn build_notification(id: i64, user_id: i64, film_id: i64, is_read: bool) -> Notification {
    let mut notification = Notification::new(
        id,
        user_id,
        film_id,
        format!("Film {} has a new release date", film_id),
        datetime!(2024-05-01 10:00 UTC) + time::Duration::minutes(id),
    );
    notification.is_read = is_read;
    notification
}

pub async fn seed_notification(
    db: &Database,
    id: i64,
    user_id: i64,
    film_id: i64,
    is_read: bool,
) -> Notification {
    let notification = build_notification(id, user_id, film_id, is_read);
    db.create_notification(&notification)
        .await
        .expect("Failed to create test notification");
    notification
}

/// Users 7 and 9, film 100, and notifications
/// `{1, user 7, unread}`, `{2, user 7, read}`, `{3, user 9, unread}`
pub async fn seed_scenario(db: &Database) {
    seed_user(db, 7).await;
    seed_user(db, 9).await;
    seed_film(db, 100).await;

    seed_notification(db, 1, 7, 100, false).await;
    seed_notification(db, 2, 7, 100, true).await;
    seed_notification(db, 3, 9, 100, false).await;
}
