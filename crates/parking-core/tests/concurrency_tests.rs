//! Concurrent park/unpark against a shared engine.

use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

use parking_core::{AllocationEngine, LotDimensions, ParkingError};

fn lot(columns: usize) -> Arc<AllocationEngine> {
    let engine = AllocationEngine::new(LotDimensions::new(1, 1, columns, 1)).unwrap();
    for column in 0..columns {
        engine.configure_spot(0, 0, column, "A-1").unwrap();
    }
    Arc::new(engine)
}

#[test]
fn test_same_vehicle_parks_once() {
    let engine = lot(16);
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                engine.park("Automobile", "CAR-1")
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let wins = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, ParkingError::VehicleAlreadyParked { .. })));
    assert_eq!(engine.occupancy().occupied, 1);
}

#[test]
fn test_racing_vehicles_never_share_a_spot() {
    let engine = lot(10);
    let barrier = Arc::new(Barrier::new(16));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let engine = Arc::clone(&engine);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                engine.park("Automobile", &format!("CAR-{}", i))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let spots: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).copied().collect();
    let unique: HashSet<_> = spots.iter().copied().collect();

    assert_eq!(spots.len(), 10);
    assert_eq!(unique.len(), 10);
    assert_eq!(engine.occupied_count(), 10);
    assert_eq!(
        results
            .iter()
            .filter(|r| matches!(r, Err(ParkingError::NoAvailableSpot(_))))
            .count(),
        6
    );
}

#[test]
fn test_park_unpark_churn_is_consistent() {
    let engine = lot(4);
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let number = format!("CAR-{}", i);
                for _ in 0..200 {
                    if let Ok(spot) = engine.park("Automobile", &number) {
                        assert!(engine.search_vehicle(&number).unwrap().is_parked());
                        engine.unpark(&spot.to_string(), &number).unwrap();
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let summary = engine.occupancy();
    assert_eq!(summary.occupied, 0);
    assert_eq!(engine.occupied_count(), 0);
    assert_eq!(summary.parked_vehicles, 0);
    assert_eq!(engine.get_available_spots("Automobile").unwrap().len(), 4);
}
