//! Host-side validation of values before they are sent to an instrument.
//!
//! All functions return the matching [`InstrumentError`] if the value is not allowed, such that
//! drivers can simply use the `?` operator before formatting a command.

use std::fmt::Display;

use crate::InstrumentError;

/// Ensure that a float value lies within the closed interval `[min, max]`.
///
/// The bounds may be given in any order, which is convenient for negative output ranges.
pub fn float_in_range(value: f64, min: f64, max: f64) -> Result<f64, InstrumentError> {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    if value.is_nan() || value < min || value > max {
        return Err(InstrumentError::FloatValueOutOfRange { value, min, max });
    }
    Ok(value)
}

/// Ensure that an integer value lies within the closed interval `[min, max]`.
pub fn int_in_range(value: i64, min: i64, max: i64) -> Result<i64, InstrumentError> {
    if value < min || value > max {
        return Err(InstrumentError::IntValueOutOfRange { value, min, max });
    }
    Ok(value)
}

/// Ensure that a value is one of the allowed values.
pub fn one_of<V: PartialEq + Display>(value: V, allowed: &[V]) -> Result<V, InstrumentError> {
    if allowed.contains(&value) {
        return Ok(value);
    }
    let allowed = allowed
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(InstrumentError::InvalidValue(format!(
        "{value} is not allowed. Allowed values are: {allowed}"
    )))
}
