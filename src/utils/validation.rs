//! Centralized validation and helper functions.

/// Validation error types for run parameters
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Window size must be at least 1 base")]
    ZeroWindow,
    #[error("Minimum insert size {0} is negative")]
    NegativeMinInsert(i64),
    #[error("Minimum insert size {min} exceeds maximum insert size {max}")]
    InsertBoundsInverted { min: i64, max: i64 },
    #[error("Estimated genome size must be at least 1 base")]
    ZeroGenomeSize,
    #[error("Threshold {name} must be a finite, non-negative number (got {value})")]
    InvalidThreshold { name: &'static str, value: f64 },
}

/// Check the insert-size acceptance band.
///
/// # Examples
///
/// ```
/// use frc_align::utils::validation::validate_insert_bounds;
///
/// assert!(validate_insert_bounds(100, 1_000_000).is_ok());
/// assert!(validate_insert_bounds(500, 100).is_err());
/// assert!(validate_insert_bounds(-1, 100).is_err());
/// ```
///
/// # Errors
///
/// Returns `ValidationError::NegativeMinInsert` or
/// `ValidationError::InsertBoundsInverted`.
pub fn validate_insert_bounds(min: i64, max: i64) -> Result<(), ValidationError> {
    if min < 0 {
        return Err(ValidationError::NegativeMinInsert(min));
    }
    if min > max {
        return Err(ValidationError::InsertBoundsInverted { min, max });
    }
    Ok(())
}

/// Check one feature threshold multiplier
///
/// # Errors
///
/// Returns `ValidationError::InvalidThreshold` for NaN, infinite or negative values.
pub fn validate_threshold(name: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidThreshold { name, value })
    }
}

/// Check a contig length from the sequence dictionary.
///
/// Returns a warning message for lengths below 1, None if the length is usable.
/// Such lengths are kept; the caller only reports them.
#[must_use]
pub fn check_contig_length(name: &str, length: u64) -> Option<String> {
    if length < 1 {
        Some(format!(
            "{name} has size {length}, which can't be right! Check the alignment header"
        ))
    } else {
        None
    }
}

/// Ratio of an accumulated length to a denominator, 0 when the denominator is 0
#[must_use]
pub fn safe_ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    {
        numerator as f64 / denominator as f64
    }
}
