//! Lot seed configuration: dimensions plus per-spot codes, loadable from YAML.
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::engine::AllocationEngine;
use crate::error::ParkingError;
use crate::model::{LotDimensions, SpotType};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read lot config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse lot config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Lot(#[from] ParkingError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotConfig {
    pub floor: usize,
    pub row: usize,
    pub column: usize,
    #[serde(rename = "type")]
    pub spot_type: SpotType,
}

impl SpotConfig {
    pub fn new(floor: usize, row: usize, column: usize, spot_type: SpotType) -> Self {
        Self {
            floor,
            row,
            column,
            spot_type,
        }
    }
}

/// Dimensions and seed spots applied before the lot serves traffic.
///
/// ```yaml
/// dimensions: { floors: 1, rows: 1, columns: 2, gates: 1 }
/// spots:
///   - { floor: 0, row: 0, column: 0, type: B-1 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotConfig {
    pub dimensions: LotDimensions,
    #[serde(default)]
    pub spots: Vec<SpotConfig>,
}

impl Default for LotConfig {
    fn default() -> Self {
        use SpotType::*;
        Self {
            dimensions: LotDimensions::new(3, 5, 10, 2),
            spots: vec![
                SpotConfig::new(0, 0, 0, Bicycle),
                SpotConfig::new(0, 0, 1, Bicycle),
                SpotConfig::new(0, 1, 0, Motorcycle),
                SpotConfig::new(0, 1, 1, Motorcycle),
                SpotConfig::new(0, 2, 0, Automobile),
                SpotConfig::new(0, 2, 1, Automobile),
                SpotConfig::new(0, 2, 2, Inactive),
                SpotConfig::new(1, 0, 0, Bicycle),
                SpotConfig::new(1, 0, 1, Motorcycle),
                SpotConfig::new(1, 1, 0, Automobile),
            ],
        }
    }
}

impl LotConfig {
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    /// Create the engine and apply every seed spot.
    ///
    /// Bad dimensions abort; a bad seed entry is logged and skipped.
    pub fn build(&self) -> Result<AllocationEngine, ConfigError> {
        let engine = AllocationEngine::new(self.dimensions)?;
        for spot in &self.spots {
            if let Err(err) = engine.configure(spot.floor, spot.row, spot.column, spot.spot_type) {
                warn!(
                    floor = spot.floor,
                    row = spot.row,
                    column = spot.column,
                    error = %err,
                    "skipping seed spot"
                );
            }
        }
        Ok(engine)
    }
}
