//! Parking Core: spot allocation and vehicle tracking for multi-floor lots
//!
//! # Architecture
//!
//! ```text
//! caller → AllocationEngine ──(one RwLock)──┬── SpotGrid      (floor × row × column)
//!                                           └── VehicleIndex  (current / history)
//! ```
//!
//! # Example
//!
//! ```
//! use parking_core::{AllocationEngine, LotDimensions};
//!
//! let engine = AllocationEngine::new(LotDimensions::new(1, 1, 2, 1)).unwrap();
//! engine.configure_spot(0, 0, 0, "B-1").unwrap();
//! engine.configure_spot(0, 0, 1, "B-1").unwrap();
//!
//! let spot = engine.park("Bicycle", "BC1").unwrap();
//! assert_eq!(spot.to_string(), "0-0-0");
//!
//! engine.unpark("0-0-0", "BC1").unwrap();
//! let location = engine.search_vehicle("BC1").unwrap();
//! assert!(!location.is_parked());
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod index;
pub mod model;

pub use config::{ConfigError, LotConfig, SpotConfig};
pub use engine::{AllocationEngine, OccupancySummary};
pub use error::{ParkingError, Result};
pub use grid::SpotGrid;
pub use index::{VehicleIndex, VehicleLocation};
pub use model::{LotDimensions, Spot, SpotId, SpotType, VehicleType};
