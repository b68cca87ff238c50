//! Apportionment request model.
//!
//! A request pairs the demand vector (students per slot) with the
//! staffing supply (TAs × shifts each) and the methods to run.
//!
//! # Capacity
//! One shift is reserved for every slot before anything is apportioned:
//!
//! `capacity = ta_count × shifts_per_ta − slot_count`

use serde::{Deserialize, Serialize};

use super::MethodSelection;
use crate::error::ApportionError;
use crate::validation::validate_input;

/// Validated input for one apportionment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApportionRequest {
    /// Students per slot, in slot order.
    pub demand: Vec<u64>,
    /// Number of TAs available.
    pub ta_count: u64,
    /// Shifts each TA works.
    pub shifts_per_ta: u64,
    /// Methods to run.
    #[serde(default)]
    pub selection: MethodSelection,
}

impl ApportionRequest {
    /// Creates a request selecting every method.
    pub fn new(demand: Vec<u64>, ta_count: u64, shifts_per_ta: u64) -> Self {
        Self {
            demand,
            ta_count,
            shifts_per_ta,
            selection: MethodSelection::all(),
        }
    }

    /// Validates signed raw input and converts it into a request.
    ///
    /// # Errors
    /// [`ApportionError::Invalid`] carrying every detected problem.
    pub fn from_raw(demand: &[i64], ta_count: i64, shifts_per_ta: i64) -> Result<Self, ApportionError> {
        validate_input(demand, ta_count, shifts_per_ta).map_err(ApportionError::Invalid)?;
        Ok(Self::new(
            demand.iter().map(|&d| d as u64).collect(),
            ta_count as u64,
            shifts_per_ta as u64,
        ))
    }

    /// Sets the method selection.
    pub fn with_selection(mut self, selection: MethodSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Number of slots.
    pub fn slot_count(&self) -> usize {
        self.demand.len()
    }

    /// Total shifts worked by all TAs.
    pub fn total_shifts(&self) -> u64 {
        self.ta_count.saturating_mul(self.shifts_per_ta)
    }

    /// Sum of demand over all slots.
    ///
    /// # Errors
    /// [`ApportionError::DemandOverflow`] when the sum exceeds `u64`.
    pub fn total_demand(&self) -> Result<u64, ApportionError> {
        self.demand
            .iter()
            .try_fold(0u64, |acc, &d| acc.checked_add(d))
            .ok_or(ApportionError::DemandOverflow)
    }

    /// Shifts left to apportion after reserving one per slot.
    ///
    /// # Errors
    /// [`ApportionError::NegativeCapacity`] when total shifts are fewer
    /// than slots.
    pub fn capacity(&self) -> Result<u64, ApportionError> {
        let total_shifts = self.total_shifts();
        total_shifts
            .checked_sub(self.slot_count() as u64)
            .ok_or(ApportionError::NegativeCapacity {
                total_shifts,
                slot_count: self.slot_count(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity() {
        let req = ApportionRequest::new(vec![10, 10, 10], 3, 2);
        assert_eq!(req.total_shifts(), 6);
        assert_eq!(req.capacity().unwrap(), 3);
        assert_eq!(req.total_demand().unwrap(), 30);
    }

    #[test]
    fn test_total_demand_overflow() {
        let req = ApportionRequest::new(vec![u64::MAX, 1], 2, 1);
        assert_eq!(req.total_demand().unwrap_err(), ApportionError::DemandOverflow);
    }

    #[test]
    fn test_from_raw_rejects_overflowing_demand() {
        let err = ApportionRequest::from_raw(&[i64::MAX, i64::MAX, i64::MAX], 10, 1).unwrap_err();
        assert!(matches!(err, ApportionError::Invalid(ref e) if e.len() == 1));
    }

    #[test]
    fn test_negative_capacity() {
        let req = ApportionRequest::new(vec![1, 2, 3, 4, 5], 2, 2);
        assert_eq!(
            req.capacity().unwrap_err(),
            ApportionError::NegativeCapacity {
                total_shifts: 4,
                slot_count: 5
            }
        );
    }

    #[test]
    fn test_from_raw() {
        let req = ApportionRequest::from_raw(&[4, 0, 9], 2, 3).unwrap();
        assert_eq!(req.demand, vec![4, 0, 9]);
        assert_eq!(req.capacity().unwrap(), 3);
        assert_eq!(req.selection, MethodSelection::all());
    }

    #[test]
    fn test_from_raw_rejects() {
        let err = ApportionRequest::from_raw(&[4, -2], 2, 3).unwrap_err();
        assert!(matches!(err, ApportionError::Invalid(ref e) if e.len() == 1));
    }

    #[test]
    fn test_deserialize_defaults_selection() {
        let req: ApportionRequest =
            serde_json::from_str(r#"{"demand":[1,2],"ta_count":2,"shifts_per_ta":2}"#).unwrap();
        assert_eq!(req.selection, MethodSelection::all());
    }
}
