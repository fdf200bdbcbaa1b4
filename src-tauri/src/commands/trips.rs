//! Trip commands
//!
//! Saving goes through the fleet service, so the desktop app gets the same
//! derived fields as the web front-end.

use crate::models::SavedTrip;
use crate::store::StoreError;
use crate::AppState;
use navexa_fleet_wasm::{
    derive_on_field_change, normalize_form, Normalized, Trip, TripForm, TripSection,
};
use serde_json::Value;
use tauri::State;

use super::{with_fleet, with_fleet_mut};

/// All trips, newest first
#[tauri::command]
pub fn get_trips(state: State<'_, AppState>) -> Result<Vec<Trip>, StoreError> {
    with_fleet(&state, |fleet| fleet.trips())
}

#[tauri::command]
pub fn get_trips_for_vehicle(
    state: State<'_, AppState>,
    vehicle_id: String,
) -> Result<Vec<Trip>, StoreError> {
    with_fleet(&state, |fleet| fleet.trips_for_vehicle(&vehicle_id))
}

/// Add (no id) or update (with id) a trip
#[tauri::command]
pub fn save_trip(state: State<'_, AppState>, trip: TripForm) -> Result<SavedTrip, StoreError> {
    with_fleet_mut(&state, |fleet| fleet.save_trip(trip))
}

/// Live re-derivation while the trip form is being edited.
///
/// Without a `section` the whole form is just normalized.
#[tauri::command]
pub fn derive_trip_form(
    form: TripForm,
    section: Option<TripSection>,
    field: Option<String>,
    value: Option<Value>,
) -> Result<Normalized<TripForm>, StoreError> {
    let form = match (section, field) {
        (Some(section), Some(field)) => {
            derive_on_field_change(form, section, &field, &value.unwrap_or(Value::Null))?
        }
        _ => form,
    };
    Ok(normalize_form(form)?)
}
