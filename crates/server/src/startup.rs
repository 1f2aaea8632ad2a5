use std::net::SocketAddr;

use axum::Router;
use migration::{Migrator, MigratorTrait};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sea_orm::DatabaseConnection;
use tracing::info;

use configs::{AppConfig, SeedConfig, ServerConfig};
use service::seed::{InitSchoolDb, SchoolSeed};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn bind_addr(cfg: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}:{}: {}", cfg.host, cfg.port, e)))
}

/// Fill an empty store with random data when seeding is enabled.
async fn seed_if_needed(db: &DatabaseConnection, cfg: &SeedConfig) -> anyhow::Result<()> {
    if !cfg.enabled {
        return Ok(());
    }
    let init = InitSchoolDb::new(db.clone());
    if !init.is_empty().await? {
        info!("store already populated, skipping seed");
        return Ok(());
    }
    let seed = SchoolSeed::random(StdRng::from_entropy(), cfg.groups, cfg.courses, cfg.students)?;
    init.init_db(&seed).await?;
    Ok(())
}

/// Connect, migrate, optionally seed, and return the ready router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    Migrator::up(&db, None).await?;
    seed_if_needed(&db, &cfg.seed).await?;
    let state = ServerState::new(db)?;
    Ok(routes::build_router(state))
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let addr = bind_addr(&cfg.server)?;
    let app = build_app(&cfg).await?;

    info!(%addr, "starting school server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
