//! Cross-method comparison of an apportionment run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Max column | Per-slot maximum over all successful methods |
//! | Deviation | `max_column − allocation`, per slot and method |
//! | Max deviation | Per-slot maximum deviation over all methods |
//! | Total extra shifts | Sum of max deviation |
//!
//! The max column is the schedule that would satisfy every method at
//! once; the extra shifts are what it costs over the leanest method per
//! slot.

use serde::Serialize;
use std::fmt;

use crate::models::{Apportionment, Method, MethodFailure};

/// One successful method measured against the max column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDeviation {
    /// Method measured.
    pub method: Method,
    /// Allocation produced.
    pub allocation: Vec<u64>,
    /// Shortfall against the max column, per slot.
    pub deviation: Vec<u64>,
    /// Sum of `deviation`.
    pub total_deviation: u64,
}

/// Comparison of every successful method in a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    /// Per-slot maximum over successful methods.
    pub max_column: Vec<u64>,
    /// Successful methods, canonical order.
    pub methods: Vec<MethodDeviation>,
    /// Requested methods that produced no allocation.
    pub failed: Vec<(Method, MethodFailure)>,
    /// Per-slot maximum deviation.
    pub max_deviation: Vec<u64>,
    /// Sum of `max_deviation`.
    pub total_extra_shifts: u64,
}

impl Comparison {
    /// Computes the comparison for a finished run.
    pub fn calculate(apportionment: &Apportionment) -> Self {
        let slot_count = apportionment.slot_count();

        let mut max_column = vec![0u64; slot_count];
        for outcome in apportionment.successful() {
            for (max, &seats) in max_column.iter_mut().zip(&outcome.allocation) {
                *max = (*max).max(seats);
            }
        }

        let mut max_deviation = vec![0u64; slot_count];
        let methods: Vec<MethodDeviation> = apportionment
            .successful()
            .map(|outcome| {
                let deviation: Vec<u64> = max_column
                    .iter()
                    .zip(&outcome.allocation)
                    .map(|(&max, &seats)| max - seats)
                    .collect();
                for (worst, &d) in max_deviation.iter_mut().zip(&deviation) {
                    *worst = (*worst).max(d);
                }
                MethodDeviation {
                    method: outcome.method,
                    allocation: outcome.allocation.clone(),
                    total_deviation: saturating_sum(&deviation),
                    deviation,
                }
            })
            .collect();

        let failed = apportionment
            .outcomes
            .iter()
            .filter_map(|o| match &o.failure {
                Some(MethodFailure::NotRequested) | None => None,
                Some(failure) => Some((o.method, failure.clone())),
            })
            .collect();

        Self {
            total_extra_shifts: saturating_sum(&max_deviation),
            max_column,
            methods,
            failed,
            max_deviation,
        }
    }

    /// Deviation entry for a method, if it succeeded.
    pub fn deviation(&self, method: Method) -> Option<&MethodDeviation> {
        self.methods.iter().find(|m| m.method == method)
    }
}

fn saturating_sum(values: &[u64]) -> u64 {
    values.iter().fold(0u64, |acc, &v| acc.saturating_add(v))
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Max column schedule:")?;
        writeln!(f, "{:?}", self.max_column)?;
        writeln!(f)?;

        for m in &self.methods {
            writeln!(f, "Schedule produced by {}'s method:", m.method)?;
            writeln!(f, "{:?}", m.allocation)?;
            writeln!(f, "Difference from max column schedule:")?;
            writeln!(f, "{:?}", m.deviation)?;
            writeln!(f, "Total difference from max column schedule: {}", m.total_deviation)?;
            writeln!(f)?;
        }

        for (method, failure) in &self.failed {
            match failure {
                MethodFailure::NotConverged { iterations } => writeln!(
                    f,
                    "{method}'s method did not return a schedule (no divisor after {iterations} iterations)."
                )?,
                _ => writeln!(f, "{method}'s method did not return a schedule.")?,
            }
            writeln!(f)?;
        }

        writeln!(f, "Maximum difference from max column schedule:")?;
        writeln!(f, "{:?}", self.max_deviation)?;
        write!(f, "Total extra shifts: {}", self.total_extra_shifts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MethodOutcome;

    fn run(outcomes: Vec<MethodOutcome>) -> Apportionment {
        Apportionment {
            total_demand: 100,
            capacity: 10,
            standard_divisor: 10.0,
            outcomes,
        }
    }

    #[test]
    fn test_max_column_and_deviation() {
        let apportionment = run(vec![
            MethodOutcome::allocated(Method::Hamilton, vec![1, 2, 10]),
            MethodOutcome::allocated(Method::Jefferson, vec![1, 1, 11]),
            MethodOutcome::failed(Method::Adam, MethodFailure::NotConverged { iterations: 9 }, 3),
            MethodOutcome::failed(Method::Webster, MethodFailure::NotRequested, 3),
        ]);
        let cmp = Comparison::calculate(&apportionment);

        assert_eq!(cmp.max_column, vec![1, 2, 11]);
        assert_eq!(cmp.deviation(Method::Hamilton).unwrap().deviation, vec![0, 0, 1]);
        assert_eq!(cmp.deviation(Method::Jefferson).unwrap().deviation, vec![0, 1, 0]);
        assert_eq!(cmp.deviation(Method::Jefferson).unwrap().total_deviation, 1);
        assert_eq!(cmp.max_deviation, vec![0, 1, 1]);
        assert_eq!(cmp.total_extra_shifts, 2);
        assert!(cmp.deviation(Method::Adam).is_none());
        assert_eq!(
            cmp.failed,
            vec![(Method::Adam, MethodFailure::NotConverged { iterations: 9 })]
        );
    }

    #[test]
    fn test_failed_outcomes_do_not_raise_max_column() {
        let apportionment = run(vec![
            MethodOutcome::allocated(Method::Hamilton, vec![2, 2]),
            MethodOutcome {
                method: Method::Adam,
                success: false,
                allocation: vec![9, 9],
                failure: Some(MethodFailure::Malformed { expected: 2, actual: 3 }),
            },
        ]);
        let cmp = Comparison::calculate(&apportionment);
        assert_eq!(cmp.max_column, vec![2, 2]);
        assert_eq!(cmp.total_extra_shifts, 0);
    }

    #[test]
    fn test_display() {
        let apportionment = run(vec![
            MethodOutcome::allocated(Method::Hamilton, vec![2, 3]),
            MethodOutcome::failed(Method::Webster, MethodFailure::NotConverged { iterations: 4 }, 2),
        ]);
        let text = Comparison::calculate(&apportionment).to_string();
        assert!(text.starts_with("Max column schedule:\n[2, 3]"));
        assert!(text.contains("Schedule produced by Hamilton's method:"));
        assert!(text.contains("Webster's method did not return a schedule"));
        assert!(text.ends_with("Total extra shifts: 0"));
    }
}
