//! Input validation for apportionment requests.
//!
//! Checks raw, signed input before it reaches the engine. Detects:
//! - Empty demand vectors
//! - Negative demand in any slot
//! - Negative TA counts
//! - Non-positive shifts per TA
//! - Too few total shifts to reserve one per slot
//! - Total demand too large to count
//!
//! All problems are collected and reported together, so a caller can
//! surface every issue in one pass.

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The demand vector has no slots.
    EmptyDemand,
    /// A slot has a negative demand count.
    NegativeDemand {
        /// Offending slot index.
        index: usize,
    },
    /// The TA count is negative.
    NegativeTaCount,
    /// Shifts per TA is zero or negative.
    NonPositiveShiftsPerTa,
    /// TA count × shifts per TA is smaller than the slot count.
    InsufficientShifts,
    /// Total demand does not fit in a `u64`.
    DemandOverflow,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the raw input for an apportionment run.
///
/// Checks:
/// 1. The demand vector is non-empty
/// 2. Every slot's demand is non-negative
/// 3. The TA count is non-negative
/// 4. Shifts per TA is positive
/// 5. Total shifts cover at least one shift per slot
/// 6. Total demand fits in a `u64`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(demand: &[i64], ta_count: i64, shifts_per_ta: i64) -> ValidationResult {
    let mut errors = Vec::new();

    if demand.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyDemand,
            "Demand vector must contain at least one slot",
        ));
    }

    for (index, &students) in demand.iter().enumerate() {
        if students < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeDemand { index },
                format!("Demand at slot {index} is negative ({students})"),
            ));
        }
    }

    let total_demand: i128 = demand.iter().map(|&d| d.max(0) as i128).sum();
    if total_demand > u64::MAX as i128 {
        errors.push(ValidationError::new(
            ValidationErrorKind::DemandOverflow,
            format!("Total demand {total_demand} exceeds {}", u64::MAX),
        ));
    }

    if ta_count < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeTaCount,
            format!("TA count must be non-negative, got {ta_count}"),
        ));
    }

    if shifts_per_ta <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveShiftsPerTa,
            format!("Shifts per TA must be positive, got {shifts_per_ta}"),
        ));
    }

    // Only meaningful once the factors themselves are sane
    if ta_count >= 0 && shifts_per_ta > 0 {
        let total_shifts = (ta_count as i128) * (shifts_per_ta as i128);
        if total_shifts < demand.len() as i128 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InsufficientShifts,
                format!(
                    "{total_shifts} total shifts cannot cover {} slots",
                    demand.len()
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&[10, 20, 30], 3, 2).is_ok());
    }

    #[test]
    fn test_zero_demand_slots_are_valid() {
        assert!(validate_input(&[0, 0, 5], 3, 1).is_ok());
    }

    #[test]
    fn test_empty_demand() {
        let errors = validate_input(&[], 2, 2).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyDemand));
    }

    #[test]
    fn test_negative_demand_reports_index() {
        let errors = validate_input(&[5, -1, 3, -7], 4, 2).unwrap_err();
        let indices: Vec<usize> = errors
            .iter()
            .filter_map(|e| match e.kind {
                ValidationErrorKind::NegativeDemand { index } => Some(index),
                _ => None,
            })
            .collect();
        assert_eq!(indices, vec![1, 3]);
    }

    #[test]
    fn test_negative_ta_count() {
        let errors = validate_input(&[1], -3, 2).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeTaCount));
        // Total-shift check is skipped when a factor is invalid
        assert!(!errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InsufficientShifts));
    }

    #[test]
    fn test_non_positive_shifts() {
        let errors = validate_input(&[1], 3, 0).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonPositiveShiftsPerTa));
    }

    #[test]
    fn test_insufficient_shifts() {
        let errors = validate_input(&[1, 2, 3, 4, 5], 2, 2).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::InsufficientShifts);
        assert!(errors[0].message.contains("4 total shifts"));
    }

    #[test]
    fn test_demand_overflow() {
        let errors = validate_input(&[i64::MAX, i64::MAX, i64::MAX], 10, 1).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DemandOverflow);

        // Two slots still fit
        assert!(validate_input(&[i64::MAX, i64::MAX], 10, 1).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let errors = validate_input(&[-1, 2], -1, -1).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
