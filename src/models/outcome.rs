//! Apportionment results.
//!
//! Every run yields exactly six [`MethodOutcome`]s in canonical order.
//! A method that could not allocate is still present, flagged with
//! `success = false`, a [`MethodFailure`] and an all-zero allocation.

use serde::{Deserialize, Serialize};

use super::Method;

/// Why a method produced no usable allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MethodFailure {
    /// The method was not selected for this run.
    NotRequested,
    /// Divisor search exhausted its budget without an exact fit.
    NotConverged {
        /// Search iterations performed.
        iterations: usize,
    },
    /// The method returned an allocation of the wrong length.
    Malformed {
        /// Expected slot count.
        expected: usize,
        /// Length actually returned.
        actual: usize,
    },
}

/// Result of one method within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodOutcome {
    /// Method that produced this outcome.
    pub method: Method,
    /// Whether `allocation` is usable.
    pub success: bool,
    /// Shifts per slot (reserved unit included), or zeros on failure.
    pub allocation: Vec<u64>,
    /// Failure reason when `success` is false.
    pub failure: Option<MethodFailure>,
}

impl MethodOutcome {
    /// A successful allocation.
    pub fn allocated(method: Method, allocation: Vec<u64>) -> Self {
        Self {
            method,
            success: true,
            allocation,
            failure: None,
        }
    }

    /// A failed outcome with a zero placeholder of `slot_count` entries.
    pub fn failed(method: Method, failure: MethodFailure, slot_count: usize) -> Self {
        Self {
            method,
            success: false,
            allocation: vec![0; slot_count],
            failure: Some(failure),
        }
    }

    /// Display name of the method.
    pub fn name(&self) -> &'static str {
        self.method.name()
    }

    /// Total shifts allocated.
    pub fn total(&self) -> u64 {
        self.allocation
            .iter()
            .fold(0u64, |acc, &s| acc.saturating_add(s))
    }
}

/// Full result of one dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Apportionment {
    /// Sum of demand over all slots.
    pub total_demand: u64,
    /// Shifts apportioned after the per-slot reservation.
    pub capacity: u64,
    /// `total_demand / capacity`; infinite when capacity is zero.
    pub standard_divisor: f64,
    /// One outcome per method, canonical order.
    pub outcomes: Vec<MethodOutcome>,
}

impl Apportionment {
    /// Outcome for a method, if present.
    ///
    /// Runs from [`Apportioner`](crate::engine::Apportioner) always hold
    /// all six; deserialized or hand-built values may not.
    pub fn get(&self, method: Method) -> Option<&MethodOutcome> {
        self.outcomes.iter().find(|o| o.method == method)
    }

    /// Outcome for a method.
    ///
    /// # Panics
    /// If the run holds no outcome for `method`. Use [`get`](Self::get)
    /// for values not produced by the dispatcher.
    pub fn outcome(&self, method: Method) -> &MethodOutcome {
        match self.get(method) {
            Some(outcome) => outcome,
            None => panic!("apportionment has no outcome for {method}"),
        }
    }

    /// Outcomes with a usable allocation.
    pub fn successful(&self) -> impl Iterator<Item = &MethodOutcome> {
        self.outcomes.iter().filter(|o| o.success)
    }

    /// Number of slots.
    pub fn slot_count(&self) -> usize {
        self.outcomes
            .first()
            .map(|o| o.allocation.len())
            .unwrap_or(0)
    }
}
