use crate::models::FleetSnapshot;
use crate::store::StoreError;
use crate::AppState;
use navexa_fleet_wasm::{DashboardStats, ExpenseSlice, MonthlySummary};
use tauri::State;

use super::with_fleet;

/// Trips, vehicles and dashboard totals in one round trip
#[tauri::command]
pub fn get_dashboard(state: State<'_, AppState>) -> Result<FleetSnapshot, StoreError> {
    with_fleet(&state, |fleet| fleet.refresh())
}

#[tauri::command]
pub fn get_vehicle_stats(
    state: State<'_, AppState>,
    vehicle_id: String,
) -> Result<DashboardStats, StoreError> {
    with_fleet(&state, |fleet| fleet.vehicle_stats(&vehicle_id))
}

#[tauri::command]
pub fn get_monthly_breakdown(
    state: State<'_, AppState>,
) -> Result<Vec<MonthlySummary>, StoreError> {
    with_fleet(&state, |fleet| fleet.monthly_breakdown())
}

#[tauri::command]
pub fn get_expense_breakdown(state: State<'_, AppState>) -> Result<Vec<ExpenseSlice>, StoreError> {
    with_fleet(&state, |fleet| fleet.expense_breakdown())
}
