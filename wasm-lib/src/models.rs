//! Fleet records shared by the front-end, the desktop backend and the CLI.
//!
//! Field names serialize in camelCase so the JSON matches the TypeScript
//! models one-to-one. Numeric fields go through [`crate::amount::lenient`],
//! which keeps older stored records (missing components, values saved as
//! text) readable.

use crate::amount::lenient;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Enums
// ============================================================================

/// How the driver payout is settled. Informational only.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    #[default]
    Cash,
    #[serde(rename = "UPI")]
    Upi,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::BankTransfer => "Bank Transfer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Some(PaymentMethod::Cash),
            "upi" => Some(PaymentMethod::Upi),
            "bank transfer" | "bank_transfer" => Some(PaymentMethod::BankTransfer),
            _ => None,
        }
    }
}

/// Settlement state of the driver payout, derived from the balance.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentStatus {
    Paid,
    #[default]
    Pending,
}

impl PaymentStatus {
    /// Any non-positive balance counts as settled, over-payment included.
    pub fn for_balance(balance: f64) -> Self {
        if balance <= 0.0 {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Pending
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Pending => "Pending",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "paid" => Some(PaymentStatus::Paid),
            "pending" => Some(PaymentStatus::Pending),
            _ => None,
        }
    }
}

/// Lifecycle of a trip
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum TripStatus {
    #[default]
    Scheduled,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Scheduled => "Scheduled",
            TripStatus::InProgress => "In Progress",
            TripStatus::Completed => "Completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "scheduled" => Some(TripStatus::Scheduled),
            "in progress" | "in_progress" => Some(TripStatus::InProgress),
            "completed" => Some(TripStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DriverStatus {
    #[default]
    Active,
    Inactive,
}

impl DriverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Active => "Active",
            DriverStatus::Inactive => "Inactive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" => Some(DriverStatus::Active),
            "inactive" => Some(DriverStatus::Inactive),
            _ => None,
        }
    }
}

// ============================================================================
// Trip sections
// ============================================================================

/// The five cost components of a trip
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expenses {
    #[serde(default, deserialize_with = "lenient")]
    pub fuel_cost: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub toll_charges: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub parking_charges: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub driver_payment: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub other_expenses: f64,
}

impl Expenses {
    pub fn total(&self) -> f64 {
        self.fuel_cost
            + self.toll_charges
            + self.parking_charges
            + self.driver_payment
            + self.other_expenses
    }
}

/// Money owed to the driver. This ledger is separate from trip revenue.
///
/// `balance` and `status` are derived; see [`crate::normalize`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    #[serde(default, deserialize_with = "lenient")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub advance_paid: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub balance: f64,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub method: PaymentMethod,
}

/// Odometer readings; `total_distance` is derived.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OdometerReading {
    #[serde(default, deserialize_with = "lenient")]
    pub start: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub end: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub total_distance: f64,
}

// ============================================================================
// Records
// ============================================================================

/// One billed transportation job
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub date: NaiveDate,
    pub vehicle_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<String>,
    pub driver_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    pub customer_name: String,
    #[serde(default)]
    pub pickup_location: String,
    #[serde(default)]
    pub drop_location: String,
    /// Gross revenue billed to the customer
    #[serde(default, deserialize_with = "lenient")]
    pub trip_amount: f64,
    pub expenses: Expenses,
    pub payment_details: PaymentDetails,
    pub odometer: OdometerReading,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: TripStatus,
}

impl Trip {
    pub fn total_expenses(&self) -> f64 {
        self.expenses.total()
    }

    /// Revenue minus all five cost components
    pub fn profit(&self) -> f64 {
        self.trip_amount - self.total_expenses()
    }
}

/// A fleet asset with its compliance dates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    pub registration_number: String,
    pub model: String,
    pub last_service_date: NaiveDate,
    pub next_service_due_date: NaiveDate,
    pub insurance_expiry_date: NaiveDate,
    pub pollution_expiry_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub license_number: String,
    #[serde(default)]
    pub status: DriverStatus,
    pub joining_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

/// Dashboard summary, recomputed on every fetch and never stored
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub pending_payments: f64,
    pub total_trips: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trip_deserializes_camel_case_and_string_amounts() {
        let trip: Trip = serde_json::from_value(json!({
            "id": "t9",
            "date": "2023-11-20",
            "vehicleId": "v1",
            "driverName": "Ramesh Kumar",
            "customerName": "Tech Corp",
            "tripAmount": "4500",
            "expenses": { "fuelCost": "1200", "tollCharges": 150 },
            "paymentDetails": { "totalAmount": 500, "advancePaid": null, "method": "UPI" },
            "odometer": { "start": 10500, "end": "abc" },
            "status": "In Progress"
        }))
        .unwrap();

        assert_eq!(trip.trip_amount, 4500.0);
        assert_eq!(trip.expenses.fuel_cost, 1200.0);
        assert_eq!(trip.expenses.parking_charges, 0.0);
        assert_eq!(trip.payment_details.advance_paid, 0.0);
        assert_eq!(trip.payment_details.method, PaymentMethod::Upi);
        assert_eq!(trip.odometer.end, 0.0);
        assert_eq!(trip.status, TripStatus::InProgress);
        assert!(trip.driver_id.is_none());
    }

    #[test]
    fn test_trip_serializes_front_end_shape() {
        let trip = Trip {
            id: "t1".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 11, 20).unwrap(),
            vehicle_id: "v1".to_string(),
            driver_id: None,
            driver_name: "Ramesh Kumar".to_string(),
            customer_id: None,
            customer_name: "Tech Corp".to_string(),
            pickup_location: "Airport".to_string(),
            drop_location: "Electronic City".to_string(),
            trip_amount: 4500.0,
            expenses: Expenses::default(),
            payment_details: PaymentDetails {
                method: PaymentMethod::BankTransfer,
                ..PaymentDetails::default()
            },
            odometer: OdometerReading::default(),
            notes: String::new(),
            status: TripStatus::Completed,
        };

        let value = serde_json::to_value(&trip).unwrap();
        assert_eq!(value["date"], "2023-11-20");
        assert_eq!(value["vehicleId"], "v1");
        assert_eq!(value["paymentDetails"]["method"], "Bank Transfer");
        assert_eq!(value["paymentDetails"]["status"], "Pending");
        assert_eq!(value["odometer"]["totalDistance"], 0.0);
        assert!(value.get("driverId").is_none());
    }

    #[test]
    fn test_expense_total() {
        let expenses = Expenses {
            fuel_cost: 1200.0,
            toll_charges: 150.0,
            parking_charges: 100.0,
            driver_payment: 500.0,
            other_expenses: 0.0,
        };
        assert_eq!(expenses.total(), 1950.0);
    }

    #[test]
    fn test_status_round_trip_through_str() {
        for status in [TripStatus::Scheduled, TripStatus::InProgress, TripStatus::Completed] {
            assert_eq!(TripStatus::from_str(status.as_str()), Some(status));
        }
        for method in [PaymentMethod::Cash, PaymentMethod::Upi, PaymentMethod::BankTransfer] {
            assert_eq!(PaymentMethod::from_str(method.as_str()), Some(method));
        }
        assert_eq!(PaymentStatus::from_str("PAID"), Some(PaymentStatus::Paid));
        assert_eq!(DriverStatus::from_str("retired"), None);
    }

    #[test]
    fn test_payment_status_for_balance() {
        assert_eq!(PaymentStatus::for_balance(0.0), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::for_balance(-50.0), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::for_balance(0.01), PaymentStatus::Pending);
    }
}
