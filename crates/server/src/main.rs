use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use sea_orm::Database;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use application::{BinRegistry, OfflineQueue, WeighingEngine};
use infrastructure::{
    SeaOrmBinRepository, SeaOrmSessionRepository, SeaOrmVesselRepository,
    SeaOrmWeighingRecordRepository, Settings, SqliteOfflineStore,
};
use migration::{Migrator, MigratorTrait};
use server::{api, setup_app_state};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding default.toml / {RUN_MODE}.toml overrides
    #[arg(long, default_value = "config")]
    config_dir: String,

    /// API port override
    #[arg(long)]
    api_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,server=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenv::dotenv().ok();
    let args = Args::parse();
    let mut settings = Settings::load(&args.config_dir)?;
    if let Some(port) = args.api_port {
        settings.api_port = port;
    }

    info!("Connecting to database...");
    let db = Database::connect(&settings.database_url).await?;

    info!("Running database migrations...");
    Migrator::up(&db, None).await?;

    let offline_store = SqliteOfflineStore::new(&settings.offline_db).await?;
    info!(path = %settings.offline_db, "offline queue initialized");

    let registry = BinRegistry::new(Arc::new(SeaOrmBinRepository::new(db.clone())));
    let engine = Arc::new(WeighingEngine::new(
        Arc::new(SeaOrmVesselRepository::new(db.clone())),
        Arc::new(SeaOrmSessionRepository::new(db.clone())),
        Arc::new(SeaOrmWeighingRecordRepository::new(db.clone())),
        registry,
    ));
    let queue = Arc::new(OfflineQueue::new(engine.clone(), Arc::new(offline_store)));

    let state = setup_app_state(engine, queue);
    let app = api::create_router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], settings.api_port));
    info!("API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
