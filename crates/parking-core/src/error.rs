//! Unified Error Model
use thiserror::Error;

use crate::model::{SpotId, VehicleType};

pub type Result<T> = std::result::Result<T, ParkingError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParkingError {
    #[error("invalid parking spot location: index out of bounds ({floor}, {row}, {column})")]
    InvalidLocation {
        floor: usize,
        row: usize,
        column: usize,
    },

    #[error("invalid spot ID format: must be floor-row-column, got {0:?}")]
    InvalidSpotId(String),

    #[error("invalid spot type: must be B-1, M-1, A-1, or X-0, got {0:?}")]
    InvalidSpotType(String),

    #[error("invalid vehicle type: must be Bicycle, Motorcycle, or Automobile, got {0:?}")]
    InvalidVehicleType(String),

    #[error("vehicle is already parked: {vehicle_number} at spot {spot_id}")]
    VehicleAlreadyParked {
        vehicle_number: String,
        spot_id: SpotId,
    },

    #[error("vehicle is not currently parked: {0}")]
    VehicleNotParked(String),

    #[error(
        "vehicle is not parked at the specified spot: {vehicle_number} at spot {spot_id}{}",
        actual_suffix(.actual)
    )]
    VehicleNotAtSpot {
        vehicle_number: String,
        spot_id: String,
        actual: Option<SpotId>,
    },

    #[error("no available parking spot for the specified vehicle type: {0}")]
    NoAvailableSpot(VehicleType),

    #[error("vehicle number cannot be empty")]
    EmptyVehicleNumber,

    #[error("cannot reconfigure an occupied parking spot: {0}")]
    OccupiedSpotReconfiguration(SpotId),

    #[error("vehicle {0} has never been parked in this parking lot")]
    NeverParked(String),

    #[error("invalid lot dimensions: {0}")]
    InvalidDimensions(String),
}

fn actual_suffix(actual: &Option<SpotId>) -> String {
    match actual {
        Some(spot) => format!(" (actual: {})", spot),
        None => String::new(),
    }
}

impl ParkingError {
    /// Stable code for wire responses and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidLocation { .. } => "INVALID_LOCATION",
            Self::InvalidSpotId(_) => "INVALID_SPOT_ID",
            Self::InvalidSpotType(_) => "INVALID_SPOT_TYPE",
            Self::InvalidVehicleType(_) => "INVALID_VEHICLE_TYPE",
            Self::VehicleAlreadyParked { .. } => "VEHICLE_ALREADY_PARKED",
            Self::VehicleNotParked(_) => "VEHICLE_NOT_PARKED",
            Self::VehicleNotAtSpot { .. } => "VEHICLE_NOT_AT_SPOT",
            Self::NoAvailableSpot(_) => "NO_AVAILABLE_SPOT",
            Self::EmptyVehicleNumber => "EMPTY_VEHICLE_NUMBER",
            Self::OccupiedSpotReconfiguration(_) => "OCCUPIED_SPOT_RECONFIGURATION",
            Self::NeverParked(_) => "NEVER_PARKED",
            Self::InvalidDimensions(_) => "INVALID_DIMENSIONS",
        }
    }
}
