// Validation Primitives
// Shared invariant checks used by entity constructors AND setters

use chrono::NaiveDate;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A field value violated a domain invariant.
///
/// Raised synchronously from the responsible build path or setter; a failed
/// build never reaches the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// INVARIANT CHECKS
// ============================================================================
// One function per rule. Constructors and setters call the same function,
// so there is exactly one source of truth per invariant.

/// Non-empty after trimming. Returns the trimmed string.
pub fn non_empty_trimmed(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Date must not be strictly after `today`.
pub fn not_in_future(
    field: &str,
    value: NaiveDate,
    today: NaiveDate,
) -> Result<NaiveDate, ValidationError> {
    if value > today {
        return Err(ValidationError::new(
            field,
            format!("must not be after today ({})", today),
        ));
    }
    Ok(value)
}

/// Strictly positive numeric.
pub fn strictly_positive(field: &str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::new(
            field,
            format!("must be strictly positive, got {}", value),
        ));
    }
    Ok(value)
}

/// Numeric bounded to a closed range.
pub fn in_range(field: &str, value: f64, min: f64, max: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() || value < min || value > max {
        return Err(ValidationError::new(
            field,
            format!("must be within [{}, {}], got {}", min, max, value),
        ));
    }
    Ok(value)
}

/// Strictly positive integer (row numbers start at 1).
pub fn positive_row(field: &str, value: u32) -> Result<u32, ValidationError> {
    if value == 0 {
        return Err(ValidationError::new(field, "must be at least 1"));
    }
    Ok(value)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_trimmed_accepts_and_trims() {
        assert_eq!(
            non_empty_trimmed("name", "  Ada  ").unwrap(),
            "Ada".to_string()
        );
    }

    #[test]
    fn test_non_empty_trimmed_rejects_blank() {
        assert!(non_empty_trimmed("name", "").is_err());
        assert!(non_empty_trimmed("name", "   ").is_err());

        let err = non_empty_trimmed("name", " \t ").unwrap_err();
        assert_eq!(err.field, "name");
    }

    #[test]
    fn test_not_in_future() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        let tomorrow = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();

        assert!(not_in_future("employment_date", yesterday, today).is_ok());
        assert!(not_in_future("employment_date", today, today).is_ok());
        assert!(not_in_future("employment_date", tomorrow, today).is_err());
    }

    #[test]
    fn test_strictly_positive() {
        assert!(strictly_positive("width_m", 0.1).is_ok());
        assert!(strictly_positive("width_m", 0.0).is_err());
        assert!(strictly_positive("width_m", -3.0).is_err());
        assert!(strictly_positive("width_m", f64::NAN).is_err());
        assert!(strictly_positive("width_m", f64::INFINITY).is_err());
    }

    #[test]
    fn test_in_range_bounds_are_inclusive() {
        assert!(in_range("humidity_pct", 0.0, 0.0, 100.0).is_ok());
        assert!(in_range("humidity_pct", 100.0, 0.0, 100.0).is_ok());
        assert!(in_range("humidity_pct", 100.1, 0.0, 100.0).is_err());
        assert!(in_range("humidity_pct", -0.1, 0.0, 100.0).is_err());
        assert!(in_range("humidity_pct", f64::NAN, 0.0, 100.0).is_err());
    }

    #[test]
    fn test_positive_row() {
        assert!(positive_row("row", 1).is_ok());
        assert!(positive_row("row", 0).is_err());
    }

    #[test]
    fn test_error_display_names_field_and_constraint() {
        let err = ValidationError::new("humidity_pct", "must be within [0, 100], got 120");
        assert_eq!(
            err.to_string(),
            "humidity_pct: must be within [0, 100], got 120"
        );
    }
}
