// src/bin/api_server.rs

use std::sync::Arc;

use khamyang_community::app::bootstrap;
use khamyang_community::transport;
use khamyang_community::{AppConfig, DataStore, MemoryStore, SqliteStore, StoreBackend};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    dotenv::dotenv().ok();

    let config = AppConfig::from_env();

    info!(backend = ?config.store_backend, "initializing store");
    let store: Arc<dyn DataStore> = match config.store_backend {
        StoreBackend::Sqlite => Arc::new(SqliteStore::connect(&config.database_url).await?),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    };

    // Seed the admin account, the upload directory and the demo seller.
    bootstrap::run(store.as_ref(), &config).await?;

    let bind_addr = config.bind_addr.clone();
    let app_state = transport::http::AppState::new(store, config);

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url(
            "/api-docs/openapi.json",
            transport::http::ApiDoc::openapi(),
        ))
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("API server listening on http://{bind_addr}");
    info!("Swagger UI available at http://{bind_addr}/swagger-ui");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    Ok(())
}
