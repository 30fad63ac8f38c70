//! Prometheus counters for parking operations, served on `/metrics`.
use prometheus::{Encoder, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

use parking_core::ParkingError;

#[derive(Clone)]
pub struct ParkingMetrics {
    registry: Registry,
    requests: IntCounterVec,
    occupied: IntGauge,
}

impl ParkingMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let requests = IntCounterVec::new(
            Opts::new("parking_requests_total", "Parking operations by outcome"),
            &["operation", "outcome"],
        )?;
        let occupied = IntGauge::new("parking_occupied_spots", "Spots currently occupied")?;
        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(occupied.clone()))?;
        Ok(Self {
            registry,
            requests,
            occupied,
        })
    }

    /// Count one operation; errors are labelled by their kind.
    pub fn observe<T>(&self, operation: &str, result: &Result<T, ParkingError>) {
        let outcome = match result {
            Ok(_) => "ok",
            Err(err) => err.kind(),
        };
        self.requests.with_label_values(&[operation, outcome]).inc();
    }

    pub fn set_occupied(&self, occupied: usize) {
        self.occupied.set(occupied as i64);
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_by_outcome() {
        let metrics = ParkingMetrics::new().unwrap();
        metrics.observe("park", &Ok::<(), ParkingError>(()));
        metrics.observe::<()>("park", &Err(ParkingError::EmptyVehicleNumber));
        metrics.set_occupied(3);

        let text = metrics.encode().unwrap();
        assert!(text.contains(r#"parking_requests_total{operation="park",outcome="ok"} 1"#));
        assert!(text.contains(r#"outcome="EMPTY_VEHICLE_NUMBER""#));
        assert!(text.contains("parking_occupied_spots 3"));
    }
}
