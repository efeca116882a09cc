// Adoption Mocks - Web Server
// REST API with Axum

use adoption_mocks::api::{router, AppState};
use adoption_mocks::{logging, BcryptHasher, Config, SqliteStore};
use anyhow::{Context, Result};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = Config::from_env()?;

    let store = SqliteStore::open(&config.db_path)?;
    tracing::info!(db_path = ?config.db_path, "database opened");

    let hasher = BcryptHasher::new(config.bcrypt_cost);
    let bind_addr = config.bind_addr.clone();
    let app = router(AppState::new(store, hasher, config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;

    tracing::info!(addr = %bind_addr, "server running");
    tracing::info!("preview: GET /api/mocks/mockingpets, GET /api/mocks/mockingusers");
    tracing::info!("persist: POST /api/mocks/generateData");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
