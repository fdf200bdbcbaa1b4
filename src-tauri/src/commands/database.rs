use crate::config::{AppConfig, DEFAULT_DB_FILE};
use crate::models::DatabaseStats;
use crate::service::FleetService;
use crate::store::{StoreError, StoreKind};
use crate::AppState;
use tauri::{AppHandle, Manager, State};

use super::with_fleet;

/// Open the configured store and keep the fleet service in app state.
///
/// Unless `NAVEXA_DB_PATH` is set, the SQLite file lives in the app data
/// directory.
#[tauri::command]
pub fn init_database(app_handle: AppHandle, state: State<'_, AppState>) -> Result<String, String> {
    let mut config = AppConfig::from_env().map_err(|e| e.to_string())?;

    if config.backend == StoreKind::Local && config.db_path.is_none() {
        let app_data_dir = app_handle
            .path()
            .app_data_dir()
            .map_err(|e| format!("Failed to get app data directory: {}", e))?;
        std::fs::create_dir_all(&app_data_dir).map_err(|e| e.to_string())?;
        config.db_path = Some(app_data_dir.join(DEFAULT_DB_FILE));
    }

    let fleet = FleetService::from_config(&config).map_err(|e| e.to_string())?;

    let mut guard = state.fleet.lock().map_err(|e| e.to_string())?;
    *guard = Some(fleet);

    Ok(match config.backend {
        StoreKind::Local => format!(
            "Database initialized successfully at: {}",
            config.db_path().display()
        ),
        StoreKind::Mock => "In-memory demo store initialized".to_string(),
    })
}

#[tauri::command]
pub fn get_database_stats(state: State<'_, AppState>) -> Result<DatabaseStats, StoreError> {
    with_fleet(&state, |fleet| fleet.database_stats())
}

#[tauri::command]
pub fn is_database_initialized(state: State<'_, AppState>) -> Result<bool, StoreError> {
    let guard = state.fleet.lock().map_err(|_| StoreError::LockPoisoned)?;
    Ok(guard.is_some())
}
