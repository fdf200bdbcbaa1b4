//! Navexa Fleet - Backend
//!
//! # Architecture
//! Native backend for the fleet management application. It provides:
//! - Trip persistence behind the [`TripStore`] trait (in-memory or SQLite)
//! - The fleet service: save/refresh cycle over the shared trip ledger core
//! - Tauri IPC commands for the desktop front-end (`desktop` feature)
//!
//! The derivation and statistics logic itself lives in `navexa-fleet-wasm`,
//! which the web front-end loads as WebAssembly.
//!
//! # Storage Backends
//! - **SQLite** (default): embedded database for on-device use
//! - **Mock**: in-memory demo data, selected with `NAVEXA_BACKEND=mock`
//!
//! Build the desktop app:
//! ```bash
//! cargo build --features desktop
//! ```

pub mod config;
pub mod ids;
pub mod mock_store;
pub mod models;
pub mod seed;
pub mod service;
pub mod store;

#[cfg(feature = "sqlite")]
pub mod database;
#[cfg(feature = "sqlite")]
pub use database::Database;

#[cfg(feature = "desktop")]
mod commands;

pub use config::AppConfig;
pub use mock_store::MockStore;
pub use service::FleetService;
pub use store::{StoreError, StoreKind, TripStore};

/// Install the `env_logger` backend; `RUST_LOG` overrides the default `info` level.
///
/// Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

// ============================================================================
// Application State
// ============================================================================

/// Desktop application state; the service is created by `init_database`
#[cfg(feature = "desktop")]
pub struct AppState {
    pub fleet: std::sync::Mutex<Option<FleetService>>,
}

// ============================================================================
// Tauri Entry Point
// ============================================================================

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    init_logging();

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .manage(AppState {
            fleet: std::sync::Mutex::new(None),
        })
        .invoke_handler(tauri::generate_handler![
            // Database initialization
            commands::database::init_database,
            commands::database::is_database_initialized,
            commands::database::get_database_stats,

            // Health check
            commands::health::health_check,

            // Trips
            commands::trips::get_trips,
            commands::trips::get_trips_for_vehicle,
            commands::trips::save_trip,
            commands::trips::derive_trip_form,

            // Dashboard and charts
            commands::dashboard::get_dashboard,
            commands::dashboard::get_vehicle_stats,
            commands::dashboard::get_monthly_breakdown,
            commands::dashboard::get_expense_breakdown,

            // Vehicles
            commands::vehicles::get_vehicles,
            commands::vehicles::add_vehicle,
            commands::vehicles::get_vehicle_compliance,

            // Drivers and customers
            commands::crew::get_drivers,
            commands::crew::add_driver,
            commands::crew::get_customers,
            commands::crew::add_customer,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
