use std::path::Path;

use db::DBService;
use server::{AppState, app};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_path =
        std::env::var("DATABASE_PATH").unwrap_or_else(|_| "site_planning.db".to_string());
    let db = DBService::new(Path::new(&database_path)).await?;

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3400);

    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}")).await?;
    info!("listening on {host}:{port}");

    axum::serve(listener, app(AppState::new(db))).await?;
    Ok(())
}
