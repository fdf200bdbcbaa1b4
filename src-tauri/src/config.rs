use crate::mock_store::MockStore;
use crate::store::{StoreError, StoreKind, TripStore};
use navexa_fleet_wasm::DEFAULT_COMPLIANCE_WINDOW_DAYS;
use std::path::PathBuf;

pub const DEFAULT_DB_FILE: &str = "navexa_fleet.db";

/// Backend configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub backend: StoreKind,
    /// SQLite file; `None` falls back to [`DEFAULT_DB_FILE`]
    pub db_path: Option<PathBuf>,
    pub compliance_window_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            db_path: None,
            compliance_window_days: DEFAULT_COMPLIANCE_WINDOW_DAYS,
        }
    }
}

fn default_backend() -> StoreKind {
    if cfg!(feature = "sqlite") {
        StoreKind::Local
    } else {
        StoreKind::Mock
    }
}

impl AppConfig {
    /// Create config from environment variables
    ///
    /// Expected env vars:
    /// - NAVEXA_BACKEND (`mock` or `local`, default: local when built with SQLite)
    /// - NAVEXA_DB_PATH (default: navexa_fleet.db)
    /// - NAVEXA_COMPLIANCE_WINDOW_DAYS (default: 30)
    pub fn from_env() -> Result<Self, StoreError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] over an arbitrary variable source
    pub fn from_vars<F>(lookup: F) -> Result<Self, StoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("NAVEXA_BACKEND") {
            config.backend = StoreKind::from_str(&raw).ok_or_else(|| {
                StoreError::Config(format!("NAVEXA_BACKEND must be mock or local, got {:?}", raw))
            })?;
        }

        if let Some(raw) = lookup("NAVEXA_DB_PATH") {
            if raw.trim().is_empty() {
                return Err(StoreError::Config("NAVEXA_DB_PATH is empty".to_string()));
            }
            config.db_path = Some(PathBuf::from(raw));
        }

        if let Some(raw) = lookup("NAVEXA_COMPLIANCE_WINDOW_DAYS") {
            config.compliance_window_days = raw
                .trim()
                .parse::<u32>()
                .map(i64::from)
                .map_err(|_| {
                    StoreError::Config(format!(
                        "NAVEXA_COMPLIANCE_WINDOW_DAYS must be a whole number of days, got {:?}",
                        raw
                    ))
                })?;
        }

        Ok(config)
    }

    pub fn db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
    }

    /// Open the configured backend
    pub fn open_store(&self) -> Result<Box<dyn TripStore>, StoreError> {
        match self.backend {
            StoreKind::Mock => {
                log::info!("Using in-memory demo store");
                Ok(Box::new(MockStore::new()))
            }
            #[cfg(feature = "sqlite")]
            StoreKind::Local => Ok(Box::new(crate::database::Database::new(self.db_path())?)),
            #[cfg(not(feature = "sqlite"))]
            StoreKind::Local => Err(StoreError::Config(
                "local backend requires the sqlite feature".to_string(),
            )),
        }
    }
}
