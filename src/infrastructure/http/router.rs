use crate::infrastructure::http::controllers::notifications;
use crate::infrastructure::http::middleware::AppState;
use axum::{
    routing::{get, put},
    Router,
};
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/api/notifications/:user_id",
            get(notifications::list_notifications),
        )
        .route(
            "/api/notifications/mark-read/:id",
            put(notifications::mark_notification_as_read),
        )
        .route(
            "/api/notifications/mark-all-read/:user_id",
            put(notifications::mark_all_notifications_as_read),
        );

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
