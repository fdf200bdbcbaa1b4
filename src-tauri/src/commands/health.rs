use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub core_version: String,
    pub timestamp: String,
}

/// Health check command to verify the Rust backend is running
#[tauri::command]
pub fn health_check() -> HealthStatus {
    HealthStatus {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        core_version: navexa_fleet_wasm::VERSION.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    }
}
