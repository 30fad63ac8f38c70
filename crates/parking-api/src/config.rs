//! Process configuration, read from the environment.
use std::path::PathBuf;

use parking_core::{ConfigError, LotConfig};

pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Listen address (`PARKING_ADDR`)
    pub addr: String,
    /// Optional YAML lot seed (`PARKING_LOT_CONFIG`); built-in seed when unset
    pub lot_config: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            lot_config: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            addr: lookup("PARKING_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            lot_config: lookup("PARKING_LOT_CONFIG")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn lot(&self) -> Result<LotConfig, ConfigError> {
        match &self.lot_config {
            Some(path) => LotConfig::load(path),
            None => Ok(LotConfig::default()),
        }
    }
}
