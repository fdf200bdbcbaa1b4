//! WASM module for Navexa Fleet
//!
//! This module provides the trip ledger logic for the web front-end:
//! derived trip fields (driver balance, payment status, odometer distance),
//! dashboard statistics, chart breakdowns and vehicle compliance.
//!
//! The same functions are used natively by the desktop backend and the
//! reporting CLI through the `rlib` target.

use chrono::NaiveDate;
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod amount;
pub mod compliance;
pub mod error;
pub mod form;
pub mod models;
pub mod normalize;
pub mod stats;

pub use compliance::{
    compliance_status, vehicle_compliance, ComplianceStatus, VehicleCompliance,
    DEFAULT_COMPLIANCE_WINDOW_DAYS,
};
pub use error::{TripError, TripSection};
pub use form::TripForm;
pub use models::{
    Customer, DashboardStats, Driver, DriverStatus, Expenses, OdometerReading, PaymentDetails,
    PaymentMethod, PaymentStatus, Trip, TripStatus, Vehicle,
};
pub use normalize::{
    derive_on_field_change, derive_on_save, normalize_form, normalize_trip, Normalized,
    TripWarning,
};
pub use stats::{
    aggregate, aggregate_for_vehicle, expense_breakdown, monthly_breakdown, ExpenseSlice,
    MonthlySummary,
};

/// Version of the trip ledger core
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Initialize panic hook for better error messages in development
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_js<T: Serialize>(value: &T, what: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize {}: {}", what, e)))
}

fn parse_trips(trips_js: JsValue) -> Result<Vec<Trip>, JsValue> {
    serde_wasm_bindgen::from_value(trips_js)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse trips: {}", e)))
}

// ============================================================================
// Trip Record Normalizer
// ============================================================================

/// Normalize a trip form before it is saved
///
/// Returns `{ trip, warnings }` where `trip` carries recomputed balance,
/// payment status and total distance. Numeric fields sent as text are
/// coerced; a missing `expenses`, `paymentDetails` or `odometer` section is
/// an error.
#[wasm_bindgen(js_name = deriveOnSave)]
pub fn derive_on_save_js(trip_js: JsValue) -> Result<JsValue, JsValue> {
    let form: TripForm = serde_wasm_bindgen::from_value(trip_js)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse trip: {}", e)))?;

    let normalized = normalize_form(form).map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_js(&normalized, "trip")
}

/// Apply one edited form field and return the re-derived form
///
/// # Arguments
/// * `section` - "expenses", "paymentDetails" or "odometer"
/// * `field` - payload key inside the section, e.g. "advancePaid"
/// * `value` - the raw input value (number or text)
#[wasm_bindgen(js_name = deriveOnFieldChange)]
pub fn derive_on_field_change_js(
    trip_js: JsValue,
    section: &str,
    field: &str,
    value_js: JsValue,
) -> Result<JsValue, JsValue> {
    let form: TripForm = serde_wasm_bindgen::from_value(trip_js)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse trip: {}", e)))?;

    let section = TripSection::from_str(section).ok_or_else(|| {
        JsValue::from_str(&TripError::UnknownSection(section.to_string()).to_string())
    })?;

    // Anything that is not representable as JSON (undefined, functions) counts as empty input
    let value: serde_json::Value =
        serde_wasm_bindgen::from_value(value_js).unwrap_or(serde_json::Value::Null);

    let form = derive_on_field_change(form, section, field, &value)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_js(&form, "trip")
}

// ============================================================================
// Fleet Statistics Aggregator
// ============================================================================

/// Calculate dashboard statistics from the fetched trip collection
#[wasm_bindgen(js_name = calculateStats)]
pub fn calculate_stats(trips_js: JsValue) -> Result<JsValue, JsValue> {
    let trips = parse_trips(trips_js)?;
    to_js(&aggregate(&trips), "statistics")
}

/// Dashboard statistics for a single vehicle
///
/// A vehicle with no trips yields all-zero statistics.
#[wasm_bindgen(js_name = getVehicleStats)]
pub fn get_vehicle_stats(vehicle_id: &str, trips_js: JsValue) -> Result<JsValue, JsValue> {
    let trips = parse_trips(trips_js)?;
    to_js(&aggregate_for_vehicle(vehicle_id, &trips), "statistics")
}

/// Income, expense and profit per month for the dashboard bar chart
#[wasm_bindgen(js_name = getMonthlyBreakdown)]
pub fn get_monthly_breakdown(trips_js: JsValue) -> Result<JsValue, JsValue> {
    let trips = parse_trips(trips_js)?;
    to_js(&monthly_breakdown(&trips), "monthly breakdown")
}

/// Fuel / Driver / Toll+Parking / Other totals for the expense pie chart
#[wasm_bindgen(js_name = getExpenseBreakdown)]
pub fn get_expense_breakdown(trips_js: JsValue) -> Result<JsValue, JsValue> {
    let trips = parse_trips(trips_js)?;
    to_js(&expense_breakdown(&trips), "expense breakdown")
}

// ============================================================================
// Vehicle Compliance
// ============================================================================

/// Today's date from the browser clock
fn browser_today() -> Option<NaiveDate> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
}

/// Classify insurance, pollution and service dates of a vehicle
///
/// # Arguments
/// * `today` - optional "YYYY-MM-DD"; defaults to the browser's current date
/// * `window_days` - optional warning window; defaults to 30 days
#[wasm_bindgen(js_name = getVehicleCompliance)]
pub fn get_vehicle_compliance(
    vehicle_js: JsValue,
    today: Option<String>,
    window_days: Option<u32>,
) -> Result<JsValue, JsValue> {
    let vehicle: Vehicle = serde_wasm_bindgen::from_value(vehicle_js)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse vehicle: {}", e)))?;

    let today = match today {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))?,
        None => browser_today().ok_or_else(|| JsValue::from_str("Browser clock unavailable"))?,
    };
    let window = window_days
        .map(i64::from)
        .unwrap_or(DEFAULT_COMPLIANCE_WINDOW_DAYS);

    to_js(&vehicle_compliance(&vehicle, today, window), "compliance")
}
