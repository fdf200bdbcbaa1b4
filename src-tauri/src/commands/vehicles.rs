use crate::models::AddVehicleRequest;
use crate::store::StoreError;
use crate::AppState;
use chrono::{Local, NaiveDate};
use navexa_fleet_wasm::{Vehicle, VehicleCompliance};
use tauri::State;

use super::{with_fleet, with_fleet_mut};

#[tauri::command]
pub fn get_vehicles(state: State<'_, AppState>) -> Result<Vec<Vehicle>, StoreError> {
    with_fleet(&state, |fleet| fleet.vehicles())
}

#[tauri::command]
pub fn add_vehicle(
    state: State<'_, AppState>,
    request: AddVehicleRequest,
) -> Result<Vehicle, StoreError> {
    with_fleet_mut(&state, |fleet| fleet.add_vehicle(request))
}

/// Compliance of every vehicle as of `today` (defaults to the local date)
#[tauri::command]
pub fn get_vehicle_compliance(
    state: State<'_, AppState>,
    today: Option<NaiveDate>,
) -> Result<Vec<VehicleCompliance>, StoreError> {
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    with_fleet(&state, |fleet| fleet.compliance_report(today))
}
