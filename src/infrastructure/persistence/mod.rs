use sqlx::{
    any::{AnyConnectOptions, AnyPoolOptions},
    AnyPool, ConnectOptions,
};
use std::str::FromStr;
use log::LevelFilter;

use crate::domain::entities::{Film, User};
use crate::domain::errors::{StoreError, StoreResult};

pub mod in_memory;
pub mod notifications;

pub use in_memory::InMemoryNotificationStore;
pub use notifications::NotificationRecord;

pub struct Database {
    pub(crate) pool: AnyPool,
}

impl Database {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        // Ensure drivers are installed for AnyPool
        sqlx::any::install_default_drivers();

        let connect_options = AnyConnectOptions::from_str(database_url)?
            .log_statements(LevelFilter::Info)
            .log_slow_statements(LevelFilter::Warn, std::time::Duration::from_secs(1));

        let pool = AnyPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .acquire_timeout(std::time::Duration::from_secs(5))
            .connect_with(connect_options)
            .await?;

        if database_url.starts_with("sqlite") {
            sqlx::query("PRAGMA journal_mode = WAL")
                .execute(&pool)
                .await?;
            sqlx::query("PRAGMA busy_timeout = 5000")
                .execute(&pool)
                .await?;
            sqlx::query("PRAGMA foreign_keys = ON")
                .execute(&pool)
                .await?;
        }

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("migrations/sqlite").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    pub async fn create_user(&self, user: &User) -> StoreResult<()> {
        sqlx::query("INSERT INTO app_user (id) VALUES (?)")
            .bind(user.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn create_film(&self, film: &Film) -> StoreResult<()> {
        sqlx::query("INSERT INTO film (id) VALUES (?)")
            .bind(film.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => StoreError::Timeout,
            sqlx::Error::ColumnNotFound(column) => {
                StoreError::Mapping(format!("missing column {}", column))
            }
            sqlx::Error::ColumnDecode { index, source } => {
                StoreError::Mapping(format!("column {}: {}", index, source))
            }
            sqlx::Error::Decode(source) => StoreError::Mapping(source.to_string()),
            sqlx::Error::Database(db_err) => {
                if is_busy_code(db_err.code().as_deref()) {
                    StoreError::Timeout
                } else {
                    StoreError::Database(db_err.message().to_string())
                }
            }
            other => StoreError::Database(other.to_string()),
        }
    }
}

/// SQLITE_BUSY and its extended codes, raised once `busy_timeout` expires
fn is_busy_code(code: Option<&str>) -> bool {
    matches!(code, Some("5") | Some("261") | Some("517") | Some("773"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_codes_are_recognised() {
        assert!(is_busy_code(Some("5")));
        assert!(is_busy_code(Some("517")));
        assert!(!is_busy_code(Some("19")));
        assert!(!is_busy_code(None));
    }

    #[test]
    fn test_pool_timeout_maps_to_timeout() {
        assert!(matches!(
            StoreError::from(sqlx::Error::PoolTimedOut),
            StoreError::Timeout
        ));
    }

    #[test]
    fn test_missing_column_maps_to_mapping_error() {
        let err = StoreError::from(sqlx::Error::ColumnNotFound("film_id".to_string()));
        match err {
            StoreError::Mapping(msg) => assert!(msg.contains("film_id")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_other_errors_map_to_database_error() {
        assert!(matches!(
            StoreError::from(sqlx::Error::PoolClosed),
            StoreError::Database(_)
        ));
    }
}
