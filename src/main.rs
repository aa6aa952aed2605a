//! Vehicle Registry API server
//! Administrator login with JWT, role-gated CRUD over vehicles

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vehicle_registry::{
    auth::{AdminStore, JwtHandler},
    build_router,
    vehicles::VehicleStore,
    AppConfig, AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env().context("Invalid configuration")?;

    info!("🚀 Vehicle registry starting");

    let admin_store = AdminStore::new(&config.database_path)?;
    admin_store.ensure_default_admin(
        &config.default_admin.email,
        &config.default_admin.password,
    )?;
    let vehicle_store = VehicleStore::new(&config.database_path)?;
    info!("📊 Database initialized at: {}", config.database_path);

    let jwt_handler = Arc::new(JwtHandler::new(&config.jwt));
    info!(
        "🔐 Tokens: issuer={} audience={} lifetime={}m",
        config.jwt.issuer, config.jwt.audience, config.jwt.expires_minutes
    );

    let state = AppState::new(Arc::new(admin_store), Arc::new(vehicle_store), jwt_handler);
    let app = build_router(state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("🎯 API server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Initialize tracing
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vehicle_registry=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
