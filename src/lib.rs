pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::services::NotificationService;
pub use config::{Config, ConfigError};
pub use domain::entities::{Film, Notification, NotificationView, User};
pub use domain::errors::{NotificationError, NotificationResult, StoreError, StoreResult};
pub use domain::ports::NotificationStore;
