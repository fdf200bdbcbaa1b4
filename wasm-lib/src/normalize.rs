//! Trip Record Normalizer
//!
//! Derives the three computed fields of a trip:
//! - `paymentDetails.balance = totalAmount - advancePaid`
//! - `paymentDetails.status = Paid` iff `balance <= 0`
//! - `odometer.totalDistance = end - start`
//!
//! Inconsistent inputs are computed, not rejected: a negative balance is an
//! over-payment and a negative distance is kept as entered. The latter is
//! surfaced as a [`TripWarning`].

use crate::amount::coerce_amount;
use crate::error::{TripError, TripSection};
use crate::form::TripForm;
use crate::models::{OdometerReading, PaymentDetails, PaymentMethod, PaymentStatus, Trip};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Non-blocking data-entry warnings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TripWarning {
    /// The end reading is below the start reading
    NegativeDistance { start: f64, end: f64 },
}

impl TripWarning {
    pub fn message(&self) -> String {
        match self {
            TripWarning::NegativeDistance { start, end } => format!(
                "Odometer end reading {} is below start reading {}",
                end, start
            ),
        }
    }
}

/// A normalized record together with its warnings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Normalized<T> {
    pub trip: T,
    pub warnings: Vec<TripWarning>,
}

impl PaymentDetails {
    pub fn rederive(&mut self) {
        self.balance = self.total_amount - self.advance_paid;
        self.status = PaymentStatus::for_balance(self.balance);
    }
}

impl OdometerReading {
    pub fn rederive(&mut self) {
        self.total_distance = self.end - self.start;
    }

    pub fn warnings(&self) -> Vec<TripWarning> {
        if self.end < self.start {
            vec![TripWarning::NegativeDistance {
                start: self.start,
                end: self.end,
            }]
        } else {
            Vec::new()
        }
    }
}

/// Recompute every derived field of a trip before it is persisted.
///
/// All other fields are returned untouched.
pub fn derive_on_save(mut trip: Trip) -> Trip {
    trip.payment_details.rederive();
    trip.odometer.rederive();
    trip
}

/// [`derive_on_save`] plus the warnings for the saved record
pub fn normalize_trip(trip: Trip) -> Normalized<Trip> {
    let trip = derive_on_save(trip);
    let warnings = trip.odometer.warnings();
    Normalized { trip, warnings }
}

/// Normalize an in-progress form; fails only on a missing section.
pub fn normalize_form(form: TripForm) -> Result<Normalized<TripForm>, TripError> {
    let form = form.normalized()?;
    let warnings = form
        .odometer
        .as_ref()
        .map(OdometerReading::warnings)
        .unwrap_or_default();
    Ok(Normalized {
        trip: form,
        warnings,
    })
}

/// Apply one edited field of one section and re-derive.
///
/// `field` uses the payload key (`"advancePaid"`, `"fuelCost"`, ...) and
/// `value` is coerced the same way as any other form input. Writing a
/// derived field is accepted and immediately overwritten.
pub fn derive_on_field_change(
    mut form: TripForm,
    section: TripSection,
    field: &str,
    value: &Value,
) -> Result<TripForm, TripError> {
    let unknown = || TripError::UnknownField {
        section,
        field: field.to_string(),
    };
    let missing = TripError::MissingRequiredSection(section);

    match section {
        TripSection::Expenses => {
            let expenses = form.expenses.as_mut().ok_or(missing)?;
            let slot = match field {
                "fuelCost" => &mut expenses.fuel_cost,
                "tollCharges" => &mut expenses.toll_charges,
                "parkingCharges" => &mut expenses.parking_charges,
                "driverPayment" => &mut expenses.driver_payment,
                "otherExpenses" => &mut expenses.other_expenses,
                _ => return Err(unknown()),
            };
            *slot = coerce_amount(value);
        }
        TripSection::PaymentDetails => {
            let payment = form.payment_details.as_mut().ok_or(missing)?;
            match field {
                "totalAmount" => payment.total_amount = coerce_amount(value),
                "advancePaid" => payment.advance_paid = coerce_amount(value),
                "method" => {
                    let raw = value.as_str().unwrap_or_default();
                    payment.method = PaymentMethod::from_str(raw)
                        .ok_or_else(|| TripError::InvalidPaymentMethod(raw.to_string()))?;
                }
                "balance" | "status" => {}
                _ => return Err(unknown()),
            }
        }
        TripSection::Odometer => {
            let odometer = form.odometer.as_mut().ok_or(missing)?;
            match field {
                "start" => odometer.start = coerce_amount(value),
                "end" => odometer.end = coerce_amount(value),
                "totalDistance" => {}
                _ => return Err(unknown()),
            }
        }
    }

    form.normalized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expenses, TripStatus};
    use chrono::NaiveDate;
    use serde_json::json;

    fn trip(total_amount: f64, advance_paid: f64, start: f64, end: f64) -> Trip {
        Trip {
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
            expenses: Expenses {
                fuel_cost: 1200.0,
                toll_charges: 150.0,
                parking_charges: 100.0,
                driver_payment: 500.0,
                other_expenses: 0.0,
            },
            payment_details: PaymentDetails {
                total_amount,
                advance_paid,
                // Stale derived values on purpose
                balance: 12345.0,
                status: PaymentStatus::Pending,
                method: PaymentMethod::Upi,
            },
            odometer: OdometerReading {
                start,
                end,
                total_distance: -1.0,
            },
            notes: "Client requested waiting for 1 hour.".to_string(),
            status: TripStatus::Completed,
        }
    }

    #[test]
    fn test_fully_paid_trip_is_settled() {
        let derived = derive_on_save(trip(500.0, 500.0, 10500.0, 10580.0));
        assert_eq!(derived.payment_details.balance, 0.0);
        assert_eq!(derived.payment_details.status, PaymentStatus::Paid);
    }

    #[test]
    fn test_partial_advance_leaves_balance_pending() {
        let derived = derive_on_save(trip(1000.0, 500.0, 0.0, 0.0));
        assert_eq!(derived.payment_details.balance, 500.0);
        assert_eq!(derived.payment_details.status, PaymentStatus::Pending);
    }

    #[test]
    fn test_overpayment_is_paid_with_negative_balance() {
        let derived = derive_on_save(trip(400.0, 600.0, 0.0, 0.0));
        assert_eq!(derived.payment_details.balance, -200.0);
        assert_eq!(derived.payment_details.status, PaymentStatus::Paid);
    }

    #[test]
    fn test_odometer_distance() {
        let derived = derive_on_save(trip(0.0, 0.0, 10580.0, 10620.0));
        assert_eq!(derived.odometer.total_distance, 40.0);
    }

    #[test]
    fn test_negative_distance_is_kept_and_warned() {
        let normalized = normalize_trip(trip(0.0, 0.0, 10620.0, 10580.0));
        assert_eq!(normalized.trip.odometer.total_distance, -40.0);
        assert_eq!(
            normalized.warnings,
            vec![TripWarning::NegativeDistance {
                start: 10620.0,
                end: 10580.0
            }]
        );
        assert!(normalized.warnings[0].message().contains("10580"));
    }

    #[test]
    fn test_derive_on_save_touches_only_derived_fields() {
        let original = trip(1000.0, 250.0, 100.0, 180.0);
        let derived = derive_on_save(original.clone());

        let mut expected = original;
        expected.payment_details.balance = 750.0;
        expected.payment_details.status = PaymentStatus::Pending;
        expected.odometer.total_distance = 80.0;
        assert_eq!(derived, expected);
    }

    #[test]
    fn test_derive_on_save_is_idempotent() {
        for (total, advance, start, end) in [
            (500.0, 500.0, 10500.0, 10580.0),
            (1000.0, 500.0, 45000.0, 45300.0),
            (400.0, 900.0, 50.0, 20.0),
            (0.1, 0.2, 0.3, 0.7),
        ] {
            let once = derive_on_save(trip(total, advance, start, end));
            let twice = derive_on_save(once.clone());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_field_change_updates_live_balance() {
        let form = TripForm::from(trip(1000.0, 0.0, 0.0, 0.0));

        let form = derive_on_field_change(
            form,
            TripSection::PaymentDetails,
            "advancePaid",
            &json!("500"),
        )
        .unwrap();

        let payment = form.payment_details.as_ref().unwrap();
        assert_eq!(payment.advance_paid, 500.0);
        assert_eq!(payment.balance, 500.0);
        assert_eq!(payment.status, PaymentStatus::Pending);
    }

    #[test]
    fn test_field_change_coerces_garbage_to_zero() {
        let form = TripForm::from(trip(1000.0, 200.0, 10.0, 50.0));

        let form =
            derive_on_field_change(form, TripSection::Odometer, "end", &json!("12k")).unwrap();
        let odometer = form.odometer.as_ref().unwrap();
        assert_eq!(odometer.end, 0.0);
        assert_eq!(odometer.total_distance, -10.0);

        let form =
            derive_on_field_change(form, TripSection::Expenses, "tollCharges", &json!(null))
                .unwrap();
        assert_eq!(form.expenses.as_ref().unwrap().toll_charges, 0.0);
    }

    #[test]
    fn test_field_change_is_idempotent() {
        let form = TripForm::from(trip(1000.0, 0.0, 0.0, 0.0));
        let value = json!(750);

        let once = derive_on_field_change(
            form,
            TripSection::PaymentDetails,
            "advancePaid",
            &value,
        )
        .unwrap();
        let twice = derive_on_field_change(
            once.clone(),
            TripSection::PaymentDetails,
            "advancePaid",
            &value,
        )
        .unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_field_change_sets_payment_method() {
        let form = TripForm::from(trip(0.0, 0.0, 0.0, 0.0));
        let form = derive_on_field_change(
            form,
            TripSection::PaymentDetails,
            "method",
            &json!("Bank Transfer"),
        )
        .unwrap();
        assert_eq!(
            form.payment_details.as_ref().unwrap().method,
            PaymentMethod::BankTransfer
        );

        let err = derive_on_field_change(
            form,
            TripSection::PaymentDetails,
            "method",
            &json!("Cheque"),
        )
        .unwrap_err();
        assert_eq!(err, TripError::InvalidPaymentMethod("Cheque".to_string()));
    }

    #[test]
    fn test_field_change_rejects_unknown_field_and_missing_section() {
        let form = TripForm::from(trip(0.0, 0.0, 0.0, 0.0));
        let err = derive_on_field_change(
            form.clone(),
            TripSection::Expenses,
            "tips",
            &json!(10),
        )
        .unwrap_err();
        assert_eq!(
            err,
            TripError::UnknownField {
                section: TripSection::Expenses,
                field: "tips".to_string()
            }
        );

        let mut form = form;
        form.odometer = None;
        let err =
            derive_on_field_change(form, TripSection::Odometer, "start", &json!(5)).unwrap_err();
        assert_eq!(err, TripError::MissingRequiredSection(TripSection::Odometer));
    }

    #[test]
    fn test_writing_derived_field_is_overwritten() {
        let form = TripForm::from(trip(300.0, 100.0, 0.0, 0.0));
        let form = derive_on_field_change(
            form,
            TripSection::PaymentDetails,
            "balance",
            &json!(9999),
        )
        .unwrap();
        assert_eq!(form.payment_details.as_ref().unwrap().balance, 200.0);
    }

    #[test]
    fn test_normalize_form_reports_warnings() {
        let form = TripForm::from(trip(0.0, 0.0, 900.0, 100.0));
        let normalized = normalize_form(form).unwrap();
        assert_eq!(normalized.warnings.len(), 1);
        assert_eq!(
            normalized.trip.odometer.as_ref().unwrap().total_distance,
            -800.0
        );
    }
}
