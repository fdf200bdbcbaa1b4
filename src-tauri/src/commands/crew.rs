//! Driver and customer directories

use crate::models::{AddCustomerRequest, AddDriverRequest};
use crate::store::StoreError;
use crate::AppState;
use navexa_fleet_wasm::{Customer, Driver};
use tauri::State;

use super::{with_fleet, with_fleet_mut};

#[tauri::command]
pub fn get_drivers(state: State<'_, AppState>) -> Result<Vec<Driver>, StoreError> {
    with_fleet(&state, |fleet| fleet.drivers())
}

#[tauri::command]
pub fn add_driver(
    state: State<'_, AppState>,
    request: AddDriverRequest,
) -> Result<Driver, StoreError> {
    with_fleet_mut(&state, |fleet| fleet.add_driver(request))
}

#[tauri::command]
pub fn get_customers(state: State<'_, AppState>) -> Result<Vec<Customer>, StoreError> {
    with_fleet(&state, |fleet| fleet.customers())
}

#[tauri::command]
pub fn add_customer(
    state: State<'_, AppState>,
    request: AddCustomerRequest,
) -> Result<Customer, StoreError> {
    with_fleet_mut(&state, |fleet| fleet.add_customer(request))
}
