mod config;

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use gazette_api::{AppState, AppStateInner};
use gazette_db::Database;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gazette=debug,gazette_api=debug,gazette_db=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;
    let db = Database::open(&config.db_path, &config.db_options())?;
    let state: AppState = Arc::new(AppStateInner { db });

    let app = gazette_api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.addr()?;
    info!("Gazette server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
