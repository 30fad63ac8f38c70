//! AllocationEngine: park/unpark orchestration over one consistency domain.
//!
//! The spot grid and the vehicle index live together in [`LotState`] behind a
//! single reader/writer lock. Every mutating operation holds the write lock
//! for its whole check-find-occupy-index (or check-release-reindex) sequence;
//! queries share the read lock. Nothing performs I/O while holding it.
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ParkingError, Result};
use crate::grid::SpotGrid;
use crate::index::{VehicleIndex, VehicleLocation};
use crate::model::{LotDimensions, Spot, SpotId, SpotType, VehicleType};

/// Grid plus vehicle index, always locked together
#[derive(Debug, Clone)]
struct LotState {
    grid: SpotGrid,
    vehicles: VehicleIndex,
}

/// Point-in-time counts for health reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OccupancySummary {
    pub total: usize,
    pub configured: usize,
    pub active: usize,
    pub occupied: usize,
    pub parked_vehicles: usize,
}

#[derive(Debug)]
pub struct AllocationEngine {
    state: RwLock<LotState>,
}

fn validate_vehicle_number(vehicle_number: &str) -> Result<()> {
    if vehicle_number.is_empty() {
        return Err(ParkingError::EmptyVehicleNumber);
    }
    Ok(())
}

fn ensure_vacant(grid: &SpotGrid, floor: usize, row: usize, column: usize) -> Result<()> {
    if grid.is_occupied(floor, row, column)? {
        let spot = SpotId::new(floor, row, column);
        debug!(spot = %spot, "refused to reconfigure occupied spot");
        return Err(ParkingError::OccupiedSpotReconfiguration(spot));
    }
    Ok(())
}

fn apply_spot_type(grid: &mut SpotGrid, floor: usize, row: usize, column: usize, spot_type: SpotType) -> Result<()> {
    grid.configure_spot(floor, row, column, spot_type.vehicle_type(), spot_type.is_active())?;
    info!(spot = %SpotId::new(floor, row, column), code = %spot_type, "spot configured");
    Ok(())
}

impl AllocationEngine {
    pub fn new(dimensions: LotDimensions) -> Result<Self> {
        Ok(Self {
            state: RwLock::new(LotState {
                grid: SpotGrid::new(dimensions)?,
                vehicles: VehicleIndex::new(),
            }),
        })
    }

    /// Replace the grid with an unconfigured one and forget all vehicles.
    pub fn initialize(&self, dimensions: LotDimensions) -> Result<()> {
        let mut state = self.state.write();
        state.grid.initialize(dimensions)?;
        state.vehicles.clear();
        info!(
            floors = dimensions.floors,
            rows = dimensions.rows,
            columns = dimensions.columns,
            gates = dimensions.gates,
            "parking lot initialized"
        );
        Ok(())
    }

    /// Apply a configuration code (`B-1`, `M-1`, `A-1`, `X-0`) to a spot.
    ///
    /// Location and occupancy are checked before the code is parsed.
    pub fn configure_spot(&self, floor: usize, row: usize, column: usize, spot_type: &str) -> Result<()> {
        let mut state = self.state.write();
        ensure_vacant(&state.grid, floor, row, column)?;
        let spot_type: SpotType = spot_type.parse()?;
        apply_spot_type(&mut state.grid, floor, row, column, spot_type)
    }

    pub fn configure(&self, floor: usize, row: usize, column: usize, spot_type: SpotType) -> Result<()> {
        let mut state = self.state.write();
        ensure_vacant(&state.grid, floor, row, column)?;
        apply_spot_type(&mut state.grid, floor, row, column, spot_type)
    }

    /// Assign the first free spot of the requested type to the vehicle.
    pub fn park(&self, vehicle_type: &str, vehicle_number: &str) -> Result<SpotId> {
        let vehicle_type: VehicleType = vehicle_type.parse()?;
        validate_vehicle_number(vehicle_number)?;

        let mut guard = self.state.write();
        let state = &mut *guard;

        if let Some(spot_id) = state.vehicles.current_spot(vehicle_number) {
            debug!(vehicle = vehicle_number, spot = %spot_id, "park rejected: already parked");
            return Err(ParkingError::VehicleAlreadyParked {
                vehicle_number: vehicle_number.to_string(),
                spot_id,
            });
        }

        let spot_id = state.grid.find_available_spot(vehicle_type)?;
        state.grid.occupy_at(spot_id, vehicle_number)?;
        state.vehicles.record_park(vehicle_number, spot_id);

        info!(vehicle = vehicle_number, %vehicle_type, spot = %spot_id, "vehicle parked");
        Ok(spot_id)
    }

    /// Release the vehicle's spot and move it into history.
    pub fn unpark(&self, spot_id: &str, vehicle_number: &str) -> Result<()> {
        validate_vehicle_number(vehicle_number)?;

        let mut guard = self.state.write();
        let state = &mut *guard;

        let current = state
            .vehicles
            .current_spot(vehicle_number)
            .ok_or_else(|| ParkingError::VehicleNotParked(vehicle_number.to_string()))?;

        if current.to_string() != spot_id {
            debug!(vehicle = vehicle_number, requested = spot_id, actual = %current, "unpark rejected");
            return Err(ParkingError::VehicleNotAtSpot {
                vehicle_number: vehicle_number.to_string(),
                spot_id: spot_id.to_string(),
                actual: Some(current),
            });
        }

        let id = state.grid.parse_spot_id(spot_id)?;
        state.grid.release(id.floor, id.row, id.column, vehicle_number)?;
        state.vehicles.record_unpark(vehicle_number);

        info!(vehicle = vehicle_number, spot = %id, "vehicle unparked");
        Ok(())
    }

    pub fn find_available_spot(&self, vehicle_type: &str) -> Result<SpotId> {
        let vehicle_type: VehicleType = vehicle_type.parse()?;
        self.state.read().grid.find_available_spot(vehicle_type)
    }

    /// All free spots for the type, in (floor, row, column) order.
    pub fn get_available_spots(&self, vehicle_type: &str) -> Result<Vec<SpotId>> {
        let vehicle_type: VehicleType = vehicle_type.parse()?;
        self.state.read().grid.list_available_spots(vehicle_type)
    }

    /// Current spot if parked, otherwise the last spot held.
    pub fn search_vehicle(&self, vehicle_number: &str) -> Result<VehicleLocation> {
        validate_vehicle_number(vehicle_number)?;
        self.state
            .read()
            .vehicles
            .locate(vehicle_number)
            .ok_or_else(|| ParkingError::NeverParked(vehicle_number.to_string()))
    }

    pub fn is_valid_location(&self, floor: usize, row: usize, column: usize) -> bool {
        self.state.read().grid.is_valid_location(floor, row, column)
    }

    pub fn is_occupied(&self, floor: usize, row: usize, column: usize) -> Result<bool> {
        self.state.read().grid.is_occupied(floor, row, column)
    }

    pub fn spot(&self, floor: usize, row: usize, column: usize) -> Result<Spot> {
        self.state.read().grid.spot(floor, row, column).cloned()
    }

    pub fn dimensions(&self) -> LotDimensions {
        self.state.read().grid.dimensions()
    }

    /// Occupied spot count; constant time, unlike [`Self::occupancy`].
    pub fn occupied_count(&self) -> usize {
        self.state.read().grid.occupied_count()
    }

    pub fn occupancy(&self) -> OccupancySummary {
        let state = self.state.read();
        OccupancySummary {
            total: state.grid.dimensions().spot_count(),
            configured: state.grid.configured_count(),
            active: state.grid.active_count(),
            occupied: state.grid.occupied_count(),
            parked_vehicles: state.vehicles.parked_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> AllocationEngine {
        let engine = AllocationEngine::new(LotDimensions::new(1, 2, 2, 1)).unwrap();
        engine.configure_spot(0, 0, 0, "B-1").unwrap();
        engine.configure_spot(0, 0, 1, "M-1").unwrap();
        engine.configure_spot(0, 1, 0, "A-1").unwrap();
        engine.configure_spot(0, 1, 1, "X-0").unwrap();
        engine
    }

    #[test]
    fn test_park_validates_inputs() {
        let engine = engine();
        assert!(matches!(engine.park("Truck", "T1"), Err(ParkingError::InvalidVehicleType(_))));
        assert!(matches!(engine.park("Bicycle", ""), Err(ParkingError::EmptyVehicleNumber)));
        assert_eq!(engine.occupancy().occupied, 0);
    }

    #[test]
    fn test_park_matches_type() {
        let engine = engine();
        assert_eq!(engine.park("Motorcycle", "MC1").unwrap(), SpotId::new(0, 0, 1));
        assert_eq!(engine.park("Automobile", "CAR1").unwrap(), SpotId::new(0, 1, 0));
        assert!(matches!(
            engine.park("Automobile", "CAR2"),
            Err(ParkingError::NoAvailableSpot(VehicleType::Automobile))
        ));
    }

    #[test]
    fn test_double_park_rejected() {
        let engine = engine();
        engine.park("Bicycle", "BC1").unwrap();
        match engine.park("Bicycle", "BC1") {
            Err(ParkingError::VehicleAlreadyParked { spot_id, .. }) => {
                assert_eq!(spot_id, SpotId::new(0, 0, 0))
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(engine.occupancy().occupied, 1);
    }

    #[test]
    fn test_unpark_checks() {
        let engine = engine();
        engine.park("Bicycle", "BC1").unwrap();

        assert!(matches!(engine.unpark("0-0-0", ""), Err(ParkingError::EmptyVehicleNumber)));
        assert!(matches!(engine.unpark("0-0-0", "NOPE"), Err(ParkingError::VehicleNotParked(_))));
        match engine.unpark("0-1-0", "BC1") {
            Err(ParkingError::VehicleNotAtSpot { spot_id, actual, .. }) => {
                assert_eq!(spot_id, "0-1-0");
                assert_eq!(actual, Some(SpotId::new(0, 0, 0)));
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(engine.is_occupied(0, 0, 0).unwrap());

        engine.unpark("0-0-0", "BC1").unwrap();
        assert!(!engine.is_occupied(0, 0, 0).unwrap());
        assert_eq!(
            engine.search_vehicle("BC1").unwrap(),
            VehicleLocation::Departed(SpotId::new(0, 0, 0))
        );
    }

    #[test]
    fn test_configure_occupied_spot_rejected() {
        let engine = engine();
        engine.park("Bicycle", "BC1").unwrap();
        assert!(matches!(
            engine.configure_spot(0, 0, 0, "X-0"),
            Err(ParkingError::OccupiedSpotReconfiguration(_))
        ));
        let spot = engine.spot(0, 0, 0).unwrap();
        assert_eq!(spot.vehicle_type, Some(VehicleType::Bicycle));
        assert!(spot.active);
    }

    #[test]
    fn test_configure_errors() {
        let engine = engine();
        assert!(matches!(engine.configure_spot(0, 0, 0, "Z-9"), Err(ParkingError::InvalidSpotType(_))));
        assert!(matches!(
            engine.configure_spot(3, 0, 0, "B-1"),
            Err(ParkingError::InvalidLocation { floor: 3, .. })
        ));
    }

    #[test]
    fn test_configure_checks_location_and_occupancy_before_code() {
        let engine = AllocationEngine::new(LotDimensions::new(1, 1, 1, 1)).unwrap();
        assert!(matches!(
            engine.configure_spot(5, 0, 0, "Q-9"),
            Err(ParkingError::InvalidLocation { floor: 5, .. })
        ));

        engine.configure_spot(0, 0, 0, "A-1").unwrap();
        engine.park("Automobile", "CAR1").unwrap();
        assert!(matches!(
            engine.configure_spot(0, 0, 0, "Q-9"),
            Err(ParkingError::OccupiedSpotReconfiguration(_))
        ));

        engine.unpark("0-0-0", "CAR1").unwrap();
        assert!(matches!(engine.configure_spot(0, 0, 0, "Q-9"), Err(ParkingError::InvalidSpotType(_))));
    }

    #[test]
    fn test_search_never_parked() {
        let engine = engine();
        assert!(matches!(engine.search_vehicle("ghost"), Err(ParkingError::NeverParked(_))));
        assert!(matches!(engine.search_vehicle(""), Err(ParkingError::EmptyVehicleNumber)));
    }

    #[test]
    fn test_initialize_clears_vehicles() {
        let engine = engine();
        engine.park("Bicycle", "BC1").unwrap();
        engine.initialize(LotDimensions::new(2, 2, 2, 2)).unwrap();
        assert!(matches!(engine.search_vehicle("BC1"), Err(ParkingError::NeverParked(_))));
        assert_eq!(engine.occupancy(), OccupancySummary {
            total: 8,
            configured: 0,
            active: 0,
            occupied: 0,
            parked_vehicles: 0,
        });
    }
}
