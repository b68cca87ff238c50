//! Precondition failures for an apportionment run.
//!
//! Only conditions that make the whole dispatch meaningless are errors.
//! A single method failing to produce an allocation is reported through
//! [`MethodFailure`](crate::models::MethodFailure) instead.

use crate::validation::ValidationError;

/// Fatal input rejection, raised before any method runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApportionError {
    /// Fewer shifts than slots: the one-per-slot reservation cannot be met.
    #[error(
        "{total_shifts} total shifts cannot cover {slot_count} slots; \
         no schedule satisfies the one-shift-per-slot constraint"
    )]
    NegativeCapacity {
        /// TA count × shifts per TA.
        total_shifts: u64,
        /// Number of slots in the demand vector.
        slot_count: usize,
    },

    /// The demand vector has no slots.
    #[error("demand vector is empty; nothing to apportion")]
    NoSlots,

    /// Total demand is zero while there are shifts left to distribute.
    #[error("total demand is zero but {capacity} shifts remain to distribute")]
    NoDemand {
        /// Shifts left after the per-slot reservation.
        capacity: u64,
    },

    /// Total demand does not fit in a `u64`.
    #[error("total demand exceeds {}", u64::MAX)]
    DemandOverflow,

    /// Raw input failed validation.
    #[error("invalid input: {}", summarize(.0))]
    Invalid(Vec<ValidationError>),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_negative_capacity_message() {
        let err = ApportionError::NegativeCapacity {
            total_shifts: 2,
            slot_count: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("2 total shifts"));
        assert!(msg.contains("5 slots"));
    }

    #[test]
    fn test_invalid_joins_messages() {
        let err = ApportionError::Invalid(vec![
            ValidationError {
                kind: ValidationErrorKind::EmptyDemand,
                message: "first".into(),
            },
            ValidationError {
                kind: ValidationErrorKind::NegativeTaCount,
                message: "second".into(),
            },
        ]);
        assert_eq!(err.to_string(), "invalid input: first; second");
    }
}
