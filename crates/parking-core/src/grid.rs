//! SpotGrid: the 3-D array of spot records.
//!
//! The grid holds no lock of its own. It is only reachable through
//! [`crate::engine::AllocationEngine`], which guards it together with the
//! vehicle index so that check-then-act sequences stay atomic.
use crate::error::{ParkingError, Result};
use crate::model::{LotDimensions, Spot, SpotId, VehicleType};

#[derive(Debug, Clone)]
pub struct SpotGrid {
    dimensions: LotDimensions,
    /// Flattened floor-major, then row, then column.
    spots: Vec<Spot>,
    /// Number of spots with an occupant
    occupied: usize,
}

impl SpotGrid {
    /// Build a fully unconfigured grid.
    pub fn new(dimensions: LotDimensions) -> Result<Self> {
        dimensions.validate()?;
        Ok(Self {
            dimensions,
            spots: vec![Spot::default(); dimensions.spot_count()],
            occupied: 0,
        })
    }

    /// Replace the grid with a fresh one of the given dimensions.
    pub fn initialize(&mut self, dimensions: LotDimensions) -> Result<()> {
        *self = Self::new(dimensions)?;
        Ok(())
    }

    pub fn dimensions(&self) -> LotDimensions {
        self.dimensions
    }

    pub fn is_valid_location(&self, floor: usize, row: usize, column: usize) -> bool {
        floor < self.dimensions.floors && row < self.dimensions.rows && column < self.dimensions.columns
    }

    fn offset(&self, floor: usize, row: usize, column: usize) -> Result<usize> {
        if !self.is_valid_location(floor, row, column) {
            return Err(ParkingError::InvalidLocation { floor, row, column });
        }
        Ok((floor * self.dimensions.rows + row) * self.dimensions.columns + column)
    }

    fn coordinates(&self, offset: usize) -> SpotId {
        let per_floor = self.dimensions.rows * self.dimensions.columns;
        SpotId::new(
            offset / per_floor,
            (offset % per_floor) / self.dimensions.columns,
            offset % self.dimensions.columns,
        )
    }

    pub fn spot(&self, floor: usize, row: usize, column: usize) -> Result<&Spot> {
        let offset = self.offset(floor, row, column)?;
        Ok(&self.spots[offset])
    }

    fn spot_mut(&mut self, floor: usize, row: usize, column: usize) -> Result<&mut Spot> {
        let offset = self.offset(floor, row, column)?;
        Ok(&mut self.spots[offset])
    }

    /// Set type and active flag. Occupancy is not checked here.
    pub fn configure_spot(
        &mut self,
        floor: usize,
        row: usize,
        column: usize,
        vehicle_type: Option<VehicleType>,
        active: bool,
    ) -> Result<()> {
        let spot = self.spot_mut(floor, row, column)?;
        spot.vehicle_type = vehicle_type;
        spot.active = active;
        Ok(())
    }

    pub fn is_occupied(&self, floor: usize, row: usize, column: usize) -> Result<bool> {
        Ok(self.spot(floor, row, column)?.is_occupied())
    }

    fn available(&self, vehicle_type: VehicleType) -> impl Iterator<Item = SpotId> + '_ {
        self.spots
            .iter()
            .enumerate()
            .filter(move |(_, spot)| spot.accepts(vehicle_type))
            .map(move |(offset, _)| self.coordinates(offset))
    }

    /// First free, active spot of the type in (floor, row, column) order.
    pub fn find_available_spot(&self, vehicle_type: VehicleType) -> Result<SpotId> {
        self.available(vehicle_type)
            .next()
            .ok_or(ParkingError::NoAvailableSpot(vehicle_type))
    }

    /// Every free, active spot of the type in scan order. Never empty on success.
    pub fn list_available_spots(&self, vehicle_type: VehicleType) -> Result<Vec<SpotId>> {
        let spots: Vec<SpotId> = self.available(vehicle_type).collect();
        if spots.is_empty() {
            return Err(ParkingError::NoAvailableSpot(vehicle_type));
        }
        Ok(spots)
    }

    /// Parse a wire spot ID and check it against the grid bounds.
    pub fn parse_spot_id(&self, spot_id: &str) -> Result<SpotId> {
        let id: SpotId = spot_id.parse()?;
        self.offset(id.floor, id.row, id.column)?;
        Ok(id)
    }

    /// Mark the spot occupied by `vehicle_number`. Prior occupancy is the
    /// caller's concern.
    pub fn occupy(&mut self, spot_id: &str, vehicle_number: &str) -> Result<SpotId> {
        let id = self.parse_spot_id(spot_id)?;
        self.occupy_at(id, vehicle_number)?;
        Ok(id)
    }

    pub(crate) fn occupy_at(&mut self, id: SpotId, vehicle_number: &str) -> Result<()> {
        let spot = self.spot_mut(id.floor, id.row, id.column)?;
        let was_occupied = spot.occupant.replace(vehicle_number.to_string()).is_some();
        if !was_occupied {
            self.occupied += 1;
        }
        Ok(())
    }

    pub fn release(&mut self, floor: usize, row: usize, column: usize, vehicle_number: &str) -> Result<()> {
        let spot = self.spot_mut(floor, row, column)?;
        if spot.occupant.as_deref() != Some(vehicle_number) {
            return Err(ParkingError::VehicleNotAtSpot {
                vehicle_number: vehicle_number.to_string(),
                spot_id: SpotId::new(floor, row, column).to_string(),
                actual: None,
            });
        }
        spot.occupant = None;
        self.occupied -= 1;
        Ok(())
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    pub fn configured_count(&self) -> usize {
        self.spots.iter().filter(|s| s.vehicle_type.is_some()).count()
    }

    pub fn active_count(&self) -> usize {
        self.spots.iter().filter(|s| s.active).count()
    }
}
