//! Validation helper functions for configuration types.

use crate::core::errors::{ModlensError, Result};

/// Validate that a usize value is greater than zero.
pub fn validate_positive_usize(value: usize, field: &str) -> Result<()> {
    if value == 0 {
        return Err(ModlensError::validation_field(
            format!("{} must be greater than 0", field),
            field,
        ));
    }
    Ok(())
}

/// Validate that an f64 value is greater than zero.
pub fn validate_positive_f64(value: f64, field: &str) -> Result<()> {
    if value.is_nan() || value <= 0.0 {
        return Err(ModlensError::validation_field(
            format!("{} must be greater than 0.0", field),
            field,
        ));
    }
    Ok(())
}

/// Validate that an f64 value is in the unit range [0.0, 1.0].
pub fn validate_unit_range(value: f64, field: &str) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ModlensError::validation_field(
            format!("{} must be between 0.0 and 1.0", field),
            field,
        ));
    }
    Ok(())
}

/// Validate that an f64 value is a percentage-style score in [0.0, 100.0].
pub fn validate_percentage(value: f64, field: &str) -> Result<()> {
    if !(0.0..=100.0).contains(&value) {
        return Err(ModlensError::validation_field(
            format!("{} must be between 0.0 and 100.0", field),
            field,
        ));
    }
    Ok(())
}

/// Validate that `low <= high` for a pair of related thresholds.
pub fn validate_ordered(low: f64, high: f64, low_field: &str, high_field: &str) -> Result<()> {
    if low > high {
        return Err(ModlensError::validation_field(
            format!("{} must not exceed {}", low_field, high_field),
            low_field,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_range_accepts_bounds() {
        assert!(validate_unit_range(0.0, "ratio").is_ok());
        assert!(validate_unit_range(1.0, "ratio").is_ok());
        assert!(validate_unit_range(1.01, "ratio").is_err());
        assert!(validate_unit_range(f64::NAN, "ratio").is_err());
    }

    #[test]
    fn percentage_rejects_negative() {
        let err = validate_percentage(-1.0, "target").unwrap_err();
        assert!(err.to_string().contains("target"));
    }

    #[test]
    fn ordered_names_the_low_field() {
        let err = validate_ordered(0.9, 0.8, "duplicate_threshold", "high_similarity_threshold")
            .unwrap_err();
        assert!(err.to_string().contains("duplicate_threshold"));
    }
}
