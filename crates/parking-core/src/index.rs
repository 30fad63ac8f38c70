//! VehicleIndex: where each vehicle is, and where it last was
use std::collections::HashMap;

use crate::model::SpotId;

#[derive(Debug, Clone, Default)]
pub struct VehicleIndex {
    current: HashMap<String, SpotId>,
    history: HashMap<String, SpotId>,
}

/// Where a vehicle can be found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleLocation {
    Parked(SpotId),
    /// Last spot held before the most recent unpark
    Departed(SpotId),
}

impl VehicleLocation {
    pub fn spot_id(&self) -> SpotId {
        match self {
            Self::Parked(spot) | Self::Departed(spot) => *spot,
        }
    }

    pub fn is_parked(&self) -> bool {
        matches!(self, Self::Parked(_))
    }
}

impl VehicleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_spot(&self, vehicle_number: &str) -> Option<SpotId> {
        self.current.get(vehicle_number).copied()
    }

    pub fn last_spot(&self, vehicle_number: &str) -> Option<SpotId> {
        self.history.get(vehicle_number).copied()
    }

    pub fn locate(&self, vehicle_number: &str) -> Option<VehicleLocation> {
        self.current_spot(vehicle_number)
            .map(VehicleLocation::Parked)
            .or_else(|| self.last_spot(vehicle_number).map(VehicleLocation::Departed))
    }

    pub fn record_park(&mut self, vehicle_number: &str, spot: SpotId) {
        self.current.insert(vehicle_number.to_string(), spot);
    }

    /// Move the vehicle from `current` into `history`.
    pub fn record_unpark(&mut self, vehicle_number: &str) -> Option<SpotId> {
        let spot = self.current.remove(vehicle_number)?;
        self.history.insert(vehicle_number.to_string(), spot);
        Some(spot)
    }

    pub fn parked_count(&self) -> usize {
        self.current.len()
    }

    pub fn clear(&mut self) {
        self.current.clear();
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut index = VehicleIndex::new();
        assert_eq!(index.locate("KA01"), None);

        index.record_park("KA01", SpotId::new(0, 0, 1));
        assert_eq!(index.locate("KA01"), Some(VehicleLocation::Parked(SpotId::new(0, 0, 1))));
        assert_eq!(index.parked_count(), 1);

        assert_eq!(index.record_unpark("KA01"), Some(SpotId::new(0, 0, 1)));
        assert_eq!(index.current_spot("KA01"), None);
        assert_eq!(index.locate("KA01"), Some(VehicleLocation::Departed(SpotId::new(0, 0, 1))));
        assert_eq!(index.parked_count(), 0);
    }

    #[test]
    fn test_history_overwritten_on_each_unpark() {
        let mut index = VehicleIndex::new();
        index.record_park("KA01", SpotId::new(0, 0, 0));
        index.record_unpark("KA01");
        index.record_park("KA01", SpotId::new(1, 2, 3));

        // Parked again: current wins over history
        let location = index.locate("KA01").unwrap();
        assert!(location.is_parked());
        assert_eq!(location.spot_id(), SpotId::new(1, 2, 3));

        index.record_unpark("KA01");
        assert_eq!(index.last_spot("KA01"), Some(SpotId::new(1, 2, 3)));
    }

    #[test]
    fn test_unpark_unknown_vehicle_is_noop() {
        let mut index = VehicleIndex::new();
        assert_eq!(index.record_unpark("ghost"), None);
        assert_eq!(index.last_spot("ghost"), None);
    }
}
