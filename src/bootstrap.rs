use crate::application::services::NotificationService;
use crate::domain::ports::NotificationStore;
use crate::infrastructure::http::middleware::AppState;
use crate::infrastructure::persistence::Database;
use std::sync::Arc;

/// Wire services against the given store
pub fn build_app_state_with_store(store: Arc<dyn NotificationStore>) -> AppState {
    let notification_service = NotificationService::new(store);
    tracing::info!("Notification service initialized");

    AppState {
        notification_service,
    }
}

pub fn build_app_state(db: Database) -> AppState {
    build_app_state_with_store(Arc::new(db) as Arc<dyn NotificationStore>)
}
