use std::env;
use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::configs::normalize_path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    pub url: String,
    pub clean_start: bool,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Seconds a connection waits on a locked database before failing
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout: u64,
    pub migration_path: Option<String>,
}

fn default_max_connections() -> u32 {
    10
}

fn default_busy_timeout() -> u64 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Auth {
    pub secret: String,
    /// Token lifetime in seconds
    pub expiration: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    pub database: Database,
    pub auth: Auth,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        Self::load(&run_mode)
    }

    /// Layers `configs/default`, `configs/{run_mode}` and `ROOMSYNC_*` variables.
    pub fn load(run_mode: &str) -> Result<Self, ConfigError> {
        let mut settings: Settings = Config::builder()
            .add_source(File::with_name("configs/default"))
            .add_source(File::with_name(&format!("configs/{run_mode}")).required(false))
            .add_source(
                Environment::with_prefix("ROOMSYNC")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        if let Some(migrate) = &settings.database.migration_path {
            let migrate_path = normalize_path(migrate)
                .map_err(|e| ConfigError::Message(e.to_string()))?;

            settings.database.migration_path = if Path::new(&migrate_path).is_dir() {
                Some(migrate_path.to_string_lossy().to_string())
            } else {
                tracing::warn!("migration path {:?} is not a directory, skipped", migrate_path);
                None
            };
        }

        Ok(settings)
    }
}
