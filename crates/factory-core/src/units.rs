//! Whole-unit counts read from loosely typed input.
//!
//! Fees, ingredient quantities and stock arrive as arbitrary numbers so a bad
//! entry can be rejected on its own instead of failing the file it came from.

use crate::error::ValidationError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// A non-negative integer count, e.g. a fee that may be zero.
pub fn whole_units(field: &'static str, value: Decimal) -> Result<u64, ValidationError> {
    if !value.fract().is_zero() {
        return Err(ValidationError::invalid(field, value));
    }
    value
        .to_u64()
        .ok_or_else(|| ValidationError::invalid(field, value))
}

/// A strictly positive integer count.
pub fn positive_units(field: &'static str, value: Decimal) -> Result<u64, ValidationError> {
    match whole_units(field, value)? {
        0 => Err(ValidationError::invalid(field, value)),
        units => Ok(units),
    }
}
