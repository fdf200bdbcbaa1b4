pub mod crew;
pub mod dashboard;
pub mod database;
pub mod health;
pub mod trips;
pub mod vehicles;

use crate::service::FleetService;
use crate::store::StoreError;
use crate::AppState;

/// Run `f` against the initialized fleet service
pub(crate) fn with_fleet<T>(
    state: &AppState,
    f: impl FnOnce(&FleetService) -> Result<T, StoreError>,
) -> Result<T, StoreError> {
    let guard = state.fleet.lock().map_err(|_| StoreError::LockPoisoned)?;
    let fleet = guard.as_ref().ok_or(StoreError::NotInitialized)?;
    f(fleet)
}

/// Mutable variant of [`with_fleet`]
pub(crate) fn with_fleet_mut<T>(
    state: &AppState,
    f: impl FnOnce(&mut FleetService) -> Result<T, StoreError>,
) -> Result<T, StoreError> {
    let mut guard = state.fleet.lock().map_err(|_| StoreError::LockPoisoned)?;
    let fleet = guard.as_mut().ok_or(StoreError::NotInitialized)?;
    f(fleet)
}
