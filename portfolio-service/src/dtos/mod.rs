//! Request payloads and response views.

pub mod auth;
pub mod clients;
pub mod contact;
pub mod documents;
pub mod resumes;
pub mod settings;
pub mod sync;
pub mod time_entries;

use rust_decimal::Decimal;
use serde::Serialize;
use validator::ValidationError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Quantities and hours must be strictly positive.
pub fn validate_positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(ValidationError::new("must_be_positive"));
    }
    Ok(())
}

/// Rates, discounts and fees may be zero but never negative.
pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(ValidationError::new("must_not_be_negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_and_negative() {
        assert!(validate_positive(&Decimal::ZERO).is_err());
        assert!(validate_positive(&Decimal::new(-1, 0)).is_err());
        assert!(validate_positive(&Decimal::ONE).is_ok());
    }

    #[test]
    fn non_negative_accepts_zero() {
        assert!(validate_non_negative(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative(&Decimal::new(-5, 1)).is_err());
    }
}
