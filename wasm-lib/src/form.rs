//! Trip form payload: the single boundary where untyped input becomes a trip.
//!
//! The front-end keeps an in-progress trip as a `TripForm`. Sections are
//! optional here so a structurally broken payload is reported as
//! [`TripError::MissingRequiredSection`] instead of being defaulted.

use crate::amount::lenient;
use crate::error::{TripError, TripSection};
use crate::models::{Expenses, OdometerReading, PaymentDetails, Trip, TripStatus};
use crate::normalize::derive_on_save;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripForm {
    /// Present when editing an existing trip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub vehicle_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<String>,
    #[serde(default)]
    pub driver_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub pickup_location: String,
    #[serde(default)]
    pub drop_location: String,
    #[serde(default, deserialize_with = "lenient")]
    pub trip_amount: f64,
    #[serde(default)]
    pub expenses: Option<Expenses>,
    #[serde(default)]
    pub payment_details: Option<PaymentDetails>,
    #[serde(default)]
    pub odometer: Option<OdometerReading>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: TripStatus,
}

impl TripForm {
    /// A blank form for a new trip, as the trip modal opens it
    pub fn blank(date: NaiveDate) -> Self {
        Self {
            id: None,
            date,
            vehicle_id: String::new(),
            driver_id: None,
            driver_name: String::new(),
            customer_id: None,
            customer_name: String::new(),
            pickup_location: String::new(),
            drop_location: String::new(),
            trip_amount: 0.0,
            expenses: Some(Expenses::default()),
            payment_details: Some(PaymentDetails::default()),
            odometer: Some(OdometerReading::default()),
            notes: String::new(),
            status: TripStatus::Scheduled,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Recompute the derived fields in place of the form.
    pub fn normalized(mut self) -> Result<Self, TripError> {
        let payment = self
            .payment_details
            .as_mut()
            .ok_or(TripError::MissingRequiredSection(TripSection::PaymentDetails))?;
        payment.rederive();

        let odometer = self
            .odometer
            .as_mut()
            .ok_or(TripError::MissingRequiredSection(TripSection::Odometer))?;
        odometer.rederive();

        if self.expenses.is_none() {
            return Err(TripError::MissingRequiredSection(TripSection::Expenses));
        }

        Ok(self)
    }

    /// Check the submit requirements: vehicle, driver and customer identity
    /// plus all three financial sections.
    pub fn validate(&self) -> Result<(), TripError> {
        self.check_identity()?;
        if self.expenses.is_none() {
            return Err(TripError::MissingRequiredSection(TripSection::Expenses));
        }
        if self.payment_details.is_none() {
            return Err(TripError::MissingRequiredSection(TripSection::PaymentDetails));
        }
        if self.odometer.is_none() {
            return Err(TripError::MissingRequiredSection(TripSection::Odometer));
        }
        Ok(())
    }

    fn check_identity(&self) -> Result<(), TripError> {
        if self.vehicle_id.trim().is_empty() {
            return Err(TripError::MissingRequiredField("vehicleId"));
        }
        if self.driver_name.trim().is_empty() {
            return Err(TripError::MissingRequiredField("driverName"));
        }
        if self.customer_name.trim().is_empty() {
            return Err(TripError::MissingRequiredField("customerName"));
        }
        Ok(())
    }

    /// Turn a submitted form into a normalized trip.
    ///
    /// An existing id is kept; `new_id` is only called for new trips.
    pub fn into_trip<F>(self, new_id: F) -> Result<Trip, TripError>
    where
        F: FnOnce() -> String,
    {
        self.check_identity()?;

        let expenses = self
            .expenses
            .ok_or(TripError::MissingRequiredSection(TripSection::Expenses))?;
        let payment_details = self
            .payment_details
            .ok_or(TripError::MissingRequiredSection(TripSection::PaymentDetails))?;
        let odometer = self
            .odometer
            .ok_or(TripError::MissingRequiredSection(TripSection::Odometer))?;

        let trip = Trip {
            id: self.id.unwrap_or_else(new_id),
            date: self.date,
            vehicle_id: self.vehicle_id,
            driver_id: self.driver_id,
            driver_name: self.driver_name,
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            pickup_location: self.pickup_location,
            drop_location: self.drop_location,
            trip_amount: self.trip_amount,
            expenses,
            payment_details,
            odometer,
            notes: self.notes,
            status: self.status,
        };

        Ok(derive_on_save(trip))
    }
}

impl From<Trip> for TripForm {
    fn from(trip: Trip) -> Self {
        Self {
            id: Some(trip.id),
            date: trip.date,
            vehicle_id: trip.vehicle_id,
            driver_id: trip.driver_id,
            driver_name: trip.driver_name,
            customer_id: trip.customer_id,
            customer_name: trip.customer_name,
            pickup_location: trip.pickup_location,
            drop_location: trip.drop_location,
            trip_amount: trip.trip_amount,
            expenses: Some(trip.expenses),
            payment_details: Some(trip.payment_details),
            odometer: Some(trip.odometer),
            notes: trip.notes,
            status: trip.status,
        }
    }
}
