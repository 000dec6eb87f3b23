use thiserror::Error;

/// Failure reported by a notification store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store operation timed out")]
    Timeout,
    #[error("Malformed notification record: {0}")]
    Mapping(String),
    #[error("Database error: {0}")]
    Database(String),
}

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Notification not found with ID: {0}")]
    NotFound(i64),
    #[error("Store failure: {0}")]
    StoreFailure(#[from] StoreError),
}

pub type StoreResult<T> = Result<T, StoreError>;
pub type NotificationResult<T> = Result<T, NotificationError>;
