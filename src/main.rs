use std::sync::Arc;

use tutoring_api::app::{app, AppState};
use tutoring_api::config;
use tutoring_api::store::postgres::PgStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tutoring_api=info,tower_http=info".into()),
        )
        .init();

    let config = config::config();
    tracing::info!("starting tutoring api in {:?} mode", config.environment);

    let store = PgStore::connect(&config.database.url, config.database.max_connections).await?;
    store.migrate().await?;

    let state = AppState::new(Arc::new(store));
    let router = app(state);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on http://{}", bind_addr);

    axum::serve(listener, router).await?;
    Ok(())
}
