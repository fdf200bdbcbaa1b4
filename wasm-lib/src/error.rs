use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A structural section of a trip payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TripSection {
    Expenses,
    PaymentDetails,
    Odometer,
}

impl TripSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripSection::Expenses => "expenses",
            TripSection::PaymentDetails => "paymentDetails",
            TripSection::Odometer => "odometer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "expenses" => Some(TripSection::Expenses),
            "paymentDetails" | "payment_details" => Some(TripSection::PaymentDetails),
            "odometer" => Some(TripSection::Odometer),
            _ => None,
        }
    }
}

impl fmt::Display for TripSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller bugs in a trip payload.
///
/// Malformed numbers are never an error; they coerce to zero.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TripError {
    #[error("Trip is missing its `{0}` section")]
    MissingRequiredSection(TripSection),

    #[error("Trip is missing required field `{0}`")]
    MissingRequiredField(&'static str),

    #[error("Unknown field `{field}` in `{section}` section")]
    UnknownField { section: TripSection, field: String },

    #[error("Unknown trip section `{0}`")]
    UnknownSection(String),

    #[error("Unsupported payment method: {0}")]
    InvalidPaymentMethod(String),
}

impl Serialize for TripError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
