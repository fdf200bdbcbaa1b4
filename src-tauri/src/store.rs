//! Persistence collaborator
//!
//! The fleet service only talks to storage through [`TripStore`]. Backends:
//! - [`MockStore`](crate::mock_store::MockStore): in-memory, seeded with demo data
//! - [`Database`](crate::database::Database): SQLite on-device storage (`sqlite` feature)

use crate::models::DatabaseStats;
use navexa_fleet_wasm::{Customer, Driver, Trip, TripError, Vehicle};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Database not initialized")]
    NotInitialized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate id: {0}")]
    Duplicate(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Application state lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    Trip(#[from] TripError),
}

impl serde::Serialize for StoreError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Which backend holds the canonical fleet data
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// In-memory demo data, lost on exit
    Mock,
    /// SQLite file on this device
    Local,
}

impl StoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::Mock => "mock",
            StoreKind::Local => "local",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mock" | "memory" => Some(StoreKind::Mock),
            "local" | "sqlite" => Some(StoreKind::Local),
            _ => None,
        }
    }
}

/// Narrow read/write interface over fleet storage.
///
/// Trips come back newest first (by trip date, then by insertion).
/// Records are written whole; there is no partial update and no delete.
pub trait TripStore: Send {
    fn kind(&self) -> StoreKind;

    fn fetch_trips(&self) -> Result<Vec<Trip>, StoreError>;

    fn fetch_trips_for_vehicle(&self, vehicle_id: &str) -> Result<Vec<Trip>, StoreError> {
        let mut trips = self.fetch_trips()?;
        trips.retain(|t| t.vehicle_id == vehicle_id);
        Ok(trips)
    }

    fn fetch_trip(&self, trip_id: &str) -> Result<Option<Trip>, StoreError>;

    /// Fails with [`StoreError::Duplicate`] if the id is taken.
    fn insert_trip(&mut self, trip: &Trip) -> Result<(), StoreError>;

    /// Fails with [`StoreError::NotFound`] if no trip has this id.
    fn replace_trip(&mut self, trip: &Trip) -> Result<(), StoreError>;

    /// Replace trips whose id exists and insert the rest.
    ///
    /// Returns `(inserted, replaced)`. Backends with transactions write the
    /// batch atomically.
    fn import_trips(&mut self, trips: &[Trip]) -> Result<(u32, u32), StoreError> {
        let mut inserted = 0;
        let mut replaced = 0;
        for trip in trips {
            if self.fetch_trip(&trip.id)?.is_some() {
                self.replace_trip(trip)?;
                replaced += 1;
            } else {
                self.insert_trip(trip)?;
                inserted += 1;
            }
        }
        Ok((inserted, replaced))
    }

    fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, StoreError>;

    fn insert_vehicle(&mut self, vehicle: &Vehicle) -> Result<(), StoreError>;

    fn fetch_drivers(&self) -> Result<Vec<Driver>, StoreError>;

    fn insert_driver(&mut self, driver: &Driver) -> Result<(), StoreError>;

    fn fetch_customers(&self) -> Result<Vec<Customer>, StoreError>;

    fn insert_customer(&mut self, customer: &Customer) -> Result<(), StoreError>;

    fn stats(&self) -> Result<DatabaseStats, StoreError>;
}
