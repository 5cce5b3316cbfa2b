use dotenvy::dotenv;
use enrollment::logging::init_tracing;
use enrollment::router::init_router;
use enrollment::state::AppState;
use enrollment_config::ServerConfig;
use enrollment_core::BcryptHasher;
use enrollment_db::{init_db_pool, run_migrations};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let pool = init_db_pool().await;
    run_migrations(&pool).await.map_err(|e| e.error)?;

    let state = AppState::from_pool(pool, Arc::new(BcryptHasher::from_env()));
    let app = init_router(state);

    let server_config = ServerConfig::from_env();
    let listener = tokio::net::TcpListener::bind(server_config.addr()).await?;

    info!(addr = %server_config.addr(), "Server running");
    info!("Swagger UI available at /swagger-ui, Scalar at /scalar");

    axum::serve(listener, app).await?;
    Ok(())
}
