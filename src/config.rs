use std::net::SocketAddr;
use std::path::PathBuf;

use crate::database::seed;
use crate::models::ActivityCatalog;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read seed file {}: {source}", path.display())]
    SeedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid seed file {}: {reason}", path.display())]
    SeedInvalid { path: PathBuf, reason: String },
    #[error("invalid bind address {0}")]
    InvalidAddress(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub seed_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            seed_path: None,
        }
    }
}

impl AppConfig {
    /// Reads HOST, PORT, STATIC_DIR and ACTIVITIES_SEED_PATH. Call
    /// `dotenvy::dotenv()` first to pick up a local `.env`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port: non_empty("PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.port),
            static_dir: non_empty("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            seed_path: non_empty("ACTIVITIES_SEED_PATH").map(PathBuf::from),
        }
    }

    pub fn bind_addr(&self, port: u16) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, port);
        raw.parse().map_err(|_| ConfigError::InvalidAddress(raw))
    }

    /// The seed catalog: the configured file if any, the built-in set otherwise.
    pub fn load_catalog(&self) -> Result<ActivityCatalog, ConfigError> {
        match &self.seed_path {
            Some(path) => seed::load_seed_file(path),
            None => Ok(seed::default_activities()),
        }
    }
}
