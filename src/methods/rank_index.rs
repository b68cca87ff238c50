//! Huntington-Hill rank-index rounding.
//!
//! Rounds each slot's quota against a closed-form cutoff between its
//! lower and upper quota, at the fixed standard divisor. No divisor
//! search takes place.
//!
//! | Mean | Cutoff |
//! |------|--------|
//! | Geometric | `sqrt(⌊q⌋ × ⌈q⌉)` |
//! | Arithmetic | `sqrt(⌊q⌋² + ⌈q⌉²)` |
//!
//! A slot receives `⌊q⌋` when `q ≤ cutoff`, `⌈q⌉` otherwise. The quota
//! `q` itself is first rounded to nearest (ties to even).
//!
//! # Reference
//! Huntington (1928), "The Apportionment of Representatives in Congress"

use serde::{Deserialize, Serialize};

use super::{quotas, with_reserved, ApportionmentMethod, MethodResult, Rounding};

/// Cutoff used between lower and upper quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mean {
    /// `sqrt(lower × upper)`.
    Geometric,
    /// `sqrt(lower² + upper²)`.
    Arithmetic,
}

impl Mean {
    /// Cutoff between `lower` and `upper`.
    pub fn cutoff(self, lower: f64, upper: f64) -> f64 {
        match self {
            Mean::Geometric => (lower * upper).sqrt(),
            Mean::Arithmetic => (lower * lower + upper * upper).sqrt(),
        }
    }
}

/// Rank-index apportionment. Never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankIndex {
    mean: Mean,
}

impl RankIndex {
    /// Creates a rank-index method using `mean`.
    pub fn new(mean: Mean) -> Self {
        Self { mean }
    }

    /// Huntington-Hill with the geometric-mean cutoff.
    pub fn geometric() -> Self {
        Self::new(Mean::Geometric)
    }

    /// Huntington-Hill with the arithmetic cutoff.
    pub fn arithmetic() -> Self {
        Self::new(Mean::Arithmetic)
    }

    /// Cutoff in use.
    pub fn mean(&self) -> Mean {
        self.mean
    }

    fn seats(&self, quota: f64) -> u64 {
        let quota = Rounding::Nearest.round(quota);
        let lower = quota.floor();
        let upper = quota.ceil();
        if quota <= self.mean.cutoff(lower, upper) {
            lower as u64
        } else {
            upper as u64
        }
    }
}

impl ApportionmentMethod for RankIndex {
    fn name(&self) -> &'static str {
        match self.mean {
            Mean::Geometric => "Huntington (computed with geometric mean)",
            Mean::Arithmetic => "Huntington (computed with arithmetic mean)",
        }
    }

    fn apportion(&self, demand: &[u64], _capacity: u64, standard_divisor: f64) -> MethodResult {
        let seats = quotas(demand, standard_divisor)
            .map(|q| self.seats(q))
            .collect();
        Ok(with_reserved(seats))
    }

    fn description(&self) -> &'static str {
        match self.mean {
            Mean::Geometric => "Rank index, geometric-mean cutoff (Huntington-Hill)",
            Mean::Arithmetic => "Rank index, arithmetic cutoff",
        }
    }
}
