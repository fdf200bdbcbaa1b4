//! In-memory store for demos and tests
//!
//! Holds the demo fleet from [`crate::seed`]. New trips are prepended, which
//! keeps same-day trips in most-recent-first order.

use crate::models::DatabaseStats;
use crate::seed::{demo_trips, demo_vehicles};
use crate::store::{StoreError, StoreKind, TripStore};
use chrono::Utc;
use navexa_fleet_wasm::{Customer, Driver, Trip, Vehicle};

#[derive(Debug, Default)]
pub struct MockStore {
    trips: Vec<Trip>,
    vehicles: Vec<Vehicle>,
    drivers: Vec<Driver>,
    customers: Vec<Customer>,
}

impl MockStore {
    /// Store pre-loaded with the demo vehicles and trips
    pub fn new() -> Self {
        let mut trips = demo_trips();
        trips.reverse();
        Self {
            trips,
            vehicles: demo_vehicles(),
            drivers: Vec::new(),
            customers: Vec::new(),
        }
    }

    /// Store without any records
    pub fn empty() -> Self {
        Self::default()
    }
}

impl TripStore for MockStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Mock
    }

    fn fetch_trips(&self) -> Result<Vec<Trip>, StoreError> {
        let mut trips = self.trips.clone();
        // Stable sort keeps insertion order among same-day trips
        trips.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(trips)
    }

    fn fetch_trip(&self, trip_id: &str) -> Result<Option<Trip>, StoreError> {
        Ok(self.trips.iter().find(|t| t.id == trip_id).cloned())
    }

    fn insert_trip(&mut self, trip: &Trip) -> Result<(), StoreError> {
        if self.trips.iter().any(|t| t.id == trip.id) {
            return Err(StoreError::Duplicate(trip.id.clone()));
        }
        self.trips.insert(0, trip.clone());
        Ok(())
    }

    fn replace_trip(&mut self, trip: &Trip) -> Result<(), StoreError> {
        let slot = self
            .trips
            .iter_mut()
            .find(|t| t.id == trip.id)
            .ok_or_else(|| StoreError::NotFound(format!("trip {}", trip.id)))?;
        *slot = trip.clone();
        Ok(())
    }

    fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, StoreError> {
        Ok(self.vehicles.clone())
    }

    fn insert_vehicle(&mut self, vehicle: &Vehicle) -> Result<(), StoreError> {
        if self.vehicles.iter().any(|v| v.id == vehicle.id) {
            return Err(StoreError::Duplicate(vehicle.id.clone()));
        }
        self.vehicles.push(vehicle.clone());
        Ok(())
    }

    fn fetch_drivers(&self) -> Result<Vec<Driver>, StoreError> {
        Ok(self.drivers.clone())
    }

    fn insert_driver(&mut self, driver: &Driver) -> Result<(), StoreError> {
        if self.drivers.iter().any(|d| d.id == driver.id) {
            return Err(StoreError::Duplicate(driver.id.clone()));
        }
        self.drivers.push(driver.clone());
        Ok(())
    }

    fn fetch_customers(&self) -> Result<Vec<Customer>, StoreError> {
        Ok(self.customers.clone())
    }

    fn insert_customer(&mut self, customer: &Customer) -> Result<(), StoreError> {
        if self.customers.iter().any(|c| c.id == customer.id) {
            return Err(StoreError::Duplicate(customer.id.clone()));
        }
        self.customers.push(customer.clone());
        Ok(())
    }

    fn stats(&self) -> Result<DatabaseStats, StoreError> {
        Ok(DatabaseStats {
            backend: StoreKind::Mock,
            total_trips: self.trips.len() as u32,
            total_vehicles: self.vehicles.len() as u32,
            total_drivers: self.drivers.len() as u32,
            total_customers: self.customers.len() as u32,
            database_size_bytes: 0,
            last_sync: Some(Utc::now()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_trips_newest_first() {
        let store = MockStore::new();
        let ids: Vec<String> = store.fetch_trips().unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["t3", "t2", "t1"]);
    }

    #[test]
    fn test_same_day_trips_most_recent_insert_first() {
        let mut store = MockStore::new();
        let mut first = demo_trips()[2].clone();
        first.id = "x1".to_string();
        let mut second = first.clone();
        second.id = "x2".to_string();

        store.insert_trip(&first).unwrap();
        store.insert_trip(&second).unwrap();

        let ids: Vec<String> = store.fetch_trips().unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["x2", "x1", "t3", "t2", "t1"]);
    }

    #[test]
    fn test_insert_duplicate_and_replace_unknown() {
        let mut store = MockStore::new();
        let trip = demo_trips()[0].clone();

        assert!(matches!(store.insert_trip(&trip), Err(StoreError::Duplicate(id)) if id == "t1"));

        let mut ghost = trip;
        ghost.id = "ghost".to_string();
        assert!(matches!(store.replace_trip(&ghost), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_fetch_trips_for_vehicle() {
        let store = MockStore::new();
        let trips = store.fetch_trips_for_vehicle("v1").unwrap();
        assert_eq!(trips.len(), 2);
        assert!(store.fetch_trips_for_vehicle("v-unknown").unwrap().is_empty());
    }

    #[test]
    fn test_empty_store_stats() {
        let stats = MockStore::empty().stats().unwrap();
        assert_eq!(stats.total_trips, 0);
        assert_eq!(stats.total_vehicles, 0);
        assert_eq!(stats.backend, StoreKind::Mock);
    }
}
