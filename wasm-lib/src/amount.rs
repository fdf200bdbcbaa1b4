//! Lenient numeric coercion for form and storage payloads
//!
//! Forms submit numbers as text and older records may lack components.
//! Anything that is not a finite number becomes `0.0` instead of an error.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce an untyped value to an amount.
///
/// - numbers pass through
/// - numeric strings are parsed (surrounding whitespace ignored)
/// - `null`, booleans, empty or non-numeric strings, arrays and objects give `0.0`
pub fn coerce_amount(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// `deserialize_with` adapter around [`coerce_amount`].
///
/// Pair it with `#[serde(default)]` so a missing field also yields `0.0`.
pub fn lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_amount).unwrap_or(0.0))
}
