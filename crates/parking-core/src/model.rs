//! Data Model: vehicles, spot codes, spot identifiers and lot dimensions
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParkingError;

pub const MAX_FLOORS: usize = 8;
pub const MAX_ROWS: usize = 1000;
pub const MAX_COLUMNS: usize = 1000;

/// Kinds of vehicle the lot can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    Bicycle,
    Motorcycle,
    Automobile,
}

impl VehicleType {
    pub const ALL: [VehicleType; 3] = [Self::Bicycle, Self::Motorcycle, Self::Automobile];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bicycle => "Bicycle",
            Self::Motorcycle => "Motorcycle",
            Self::Automobile => "Automobile",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = ParkingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bicycle" => Ok(Self::Bicycle),
            "Motorcycle" => Ok(Self::Motorcycle),
            "Automobile" => Ok(Self::Automobile),
            other => Err(ParkingError::InvalidVehicleType(other.to_string())),
        }
    }
}

/// Configuration code applied to a spot by the lot operator.
///
/// `B-1`, `M-1` and `A-1` activate the spot for one vehicle type;
/// `X-0` clears the type and deactivates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SpotType {
    Bicycle,
    Motorcycle,
    Automobile,
    Inactive,
}

impl SpotType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Bicycle => "B-1",
            Self::Motorcycle => "M-1",
            Self::Automobile => "A-1",
            Self::Inactive => "X-0",
        }
    }

    pub fn vehicle_type(&self) -> Option<VehicleType> {
        match self {
            Self::Bicycle => Some(VehicleType::Bicycle),
            Self::Motorcycle => Some(VehicleType::Motorcycle),
            Self::Automobile => Some(VehicleType::Automobile),
            Self::Inactive => None,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Inactive)
    }
}

impl FromStr for SpotType {
    type Err = ParkingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B-1" => Ok(Self::Bicycle),
            "M-1" => Ok(Self::Motorcycle),
            "A-1" => Ok(Self::Automobile),
            "X-0" => Ok(Self::Inactive),
            other => Err(ParkingError::InvalidSpotType(other.to_string())),
        }
    }
}

impl TryFrom<String> for SpotType {
    type Error = ParkingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SpotType> for String {
    fn from(value: SpotType) -> Self {
        value.code().to_string()
    }
}

impl fmt::Display for SpotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Coordinates of a spot, rendered on the wire as `floor-row-column`.
///
/// Ordering is lexicographic over (floor, row, column), which is also the
/// grid scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpotId {
    pub floor: usize,
    pub row: usize,
    pub column: usize,
}

impl SpotId {
    pub fn new(floor: usize, row: usize, column: usize) -> Self {
        Self { floor, row, column }
    }
}

impl fmt::Display for SpotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.floor, self.row, self.column)
    }
}

impl FromStr for SpotId {
    type Err = ParkingError;

    /// Format-only parse. Bounds are checked by the grid.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParkingError::InvalidSpotId(s.to_string());

        let mut parts = s.split('-');
        let mut next = || -> Result<usize, ParkingError> {
            let part = parts.next().ok_or_else(invalid)?;
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            part.parse().map_err(|_| invalid())
        };

        let floor = next()?;
        let row = next()?;
        let column = next()?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self { floor, row, column })
    }
}

impl Serialize for SpotId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SpotId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A single parking spot record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spot {
    /// `None` while unconfigured or after an `X-0` code
    pub vehicle_type: Option<VehicleType>,
    pub active: bool,
    /// Vehicle number of the occupant; `Some` exactly when occupied
    pub occupant: Option<String>,
}

impl Spot {
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn accepts(&self, vehicle_type: VehicleType) -> bool {
        self.active && self.vehicle_type == Some(vehicle_type) && !self.is_occupied()
    }
}

/// Lot dimensions, fixed at initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotDimensions {
    pub floors: usize,
    pub rows: usize,
    pub columns: usize,
    /// Reserved metadata; allocation never reads it.
    pub gates: usize,
}

impl LotDimensions {
    pub fn new(floors: usize, rows: usize, columns: usize, gates: usize) -> Self {
        Self {
            floors,
            rows,
            columns,
            gates,
        }
    }

    pub fn spot_count(&self) -> usize {
        self.floors * self.rows * self.columns
    }

    pub fn validate(&self) -> Result<(), ParkingError> {
        if !(1..=MAX_FLOORS).contains(&self.floors) {
            return Err(ParkingError::InvalidDimensions(format!(
                "floors must be between 1 and {}",
                MAX_FLOORS
            )));
        }
        if !(1..=MAX_ROWS).contains(&self.rows) {
            return Err(ParkingError::InvalidDimensions(format!(
                "rows must be between 1 and {}",
                MAX_ROWS
            )));
        }
        if !(1..=MAX_COLUMNS).contains(&self.columns) {
            return Err(ParkingError::InvalidDimensions(format!(
                "columns must be between 1 and {}",
                MAX_COLUMNS
            )));
        }
        if self.gates < 1 {
            return Err(ParkingError::InvalidDimensions(
                "gates must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
