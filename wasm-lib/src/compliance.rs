//! Vehicle compliance: insurance, pollution certificate and service due dates.

use crate::models::Vehicle;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Days ahead of a deadline at which a vehicle is flagged
pub const DEFAULT_COMPLIANCE_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ComplianceStatus {
    Expired,
    DueSoon,
    Valid,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleCompliance {
    pub vehicle_id: String,
    pub registration_number: String,
    pub insurance: ComplianceStatus,
    pub pollution: ComplianceStatus,
    pub service: ComplianceStatus,
}

impl VehicleCompliance {
    pub fn needs_attention(&self) -> bool {
        [self.insurance, self.pollution, self.service]
            .iter()
            .any(|s| *s != ComplianceStatus::Valid)
    }
}

/// Classify a deadline relative to `today`.
///
/// A deadline of today is due soon, not expired.
pub fn compliance_status(
    deadline: NaiveDate,
    today: NaiveDate,
    window_days: i64,
) -> ComplianceStatus {
    let days_left = (deadline - today).num_days();

    if days_left < 0 {
        ComplianceStatus::Expired
    } else if days_left <= window_days {
        ComplianceStatus::DueSoon
    } else {
        ComplianceStatus::Valid
    }
}

pub fn vehicle_compliance(
    vehicle: &Vehicle,
    today: NaiveDate,
    window_days: i64,
) -> VehicleCompliance {
    VehicleCompliance {
        vehicle_id: vehicle.id.clone(),
        registration_number: vehicle.registration_number.clone(),
        insurance: compliance_status(vehicle.insurance_expiry_date, today, window_days),
        pollution: compliance_status(vehicle.pollution_expiry_date, today, window_days),
        service: compliance_status(vehicle.next_service_due_date, today, window_days),
    }
}
