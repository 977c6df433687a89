//! Infrastructure layer - External integrations

pub mod config;
pub mod database;

pub use config::Settings;
pub use database::{
    SeaOrmBinRepository, SeaOrmSessionRepository, SeaOrmVesselRepository,
    SeaOrmWeighingRecordRepository, SqliteOfflineStore,
};
