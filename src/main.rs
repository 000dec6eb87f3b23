use film_notifications::bootstrap;
use film_notifications::config::Config;
use film_notifications::infrastructure::http::router::build_router;
use film_notifications::infrastructure::observability;
use film_notifications::infrastructure::persistence::Database;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let _guard = observability::init(&config)?;
    tracing::info!("Configuration loaded");

    let db = Database::connect(&config.database_url, config.database_max_connections).await?;
    tracing::info!("Database connection established");

    db.run_migrations().await?;
    tracing::info!("Database migrations applied");

    let state = bootstrap::build_app_state(db);
    let app = build_router(state);

    let addr = config.server_address();
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
