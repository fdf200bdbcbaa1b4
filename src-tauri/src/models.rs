use chrono::{DateTime, NaiveDate, Utc};
use navexa_fleet_wasm::{DashboardStats, DriverStatus, Normalized, Trip, Vehicle};
use serde::{Deserialize, Serialize};

use crate::store::StoreKind;

/// Everything the dashboard needs after a fetch cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSnapshot {
    pub trips: Vec<Trip>,
    pub vehicles: Vec<Vehicle>,
    pub stats: DashboardStats,
}

/// A persisted trip and the data-entry warnings raised while saving it
pub type SavedTrip = Normalized<Trip>;

/// Storage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStats {
    pub backend: StoreKind,
    pub total_trips: u32,
    pub total_vehicles: u32,
    pub total_drivers: u32,
    pub total_customers: u32,
    pub database_size_bytes: u64,
    pub last_sync: Option<DateTime<Utc>>,
}

/// Result of a bulk trip import
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub inserted: u32,
    pub replaced: u32,
    pub warnings: u32,
}

/// Request to add a vehicle to the fleet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddVehicleRequest {
    pub registration_number: String,
    pub model: String,
    pub last_service_date: NaiveDate,
    pub next_service_due_date: NaiveDate,
    pub insurance_expiry_date: NaiveDate,
    pub pollution_expiry_date: NaiveDate,
}

/// Request to add a driver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDriverRequest {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub license_number: String,
    #[serde(default)]
    pub status: DriverStatus,
    pub joining_date: NaiveDate,
}

/// Request to add a customer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCustomerRequest {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}
