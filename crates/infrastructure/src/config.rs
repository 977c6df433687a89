use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Process configuration, layered file + environment.
///
/// Environment variables use the `NAVIPESCA` prefix with `__` separators,
/// e.g. `NAVIPESCA__DATABASE_URL=postgres://...`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// PostgreSQL connection string for the main store.
    pub database_url: String,
    /// SQLite connection string for the durable offline queue.
    #[serde(default = "default_offline_db")]
    pub offline_db: String,
    #[serde(default = "default_api_port")]
    pub api_port: u16,
}

fn default_offline_db() -> String {
    "sqlite://navipesca_offline.db?mode=rwc".to_string()
}

fn default_api_port() -> u16 {
    3000
}

impl Settings {
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .set_default("offline_db", default_offline_db())?
            .set_default("api_port", default_api_port() as i64)?
            // Base config file - e.g. config/default.toml
            .add_source(File::with_name(&format!("{config_dir}/default")).required(false))
            // Per-environment overrides
            .add_source(File::with_name(&format!("{config_dir}/{run_mode}")).required(false))
            // Environment variables win
            .add_source(Environment::with_prefix("NAVIPESCA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
