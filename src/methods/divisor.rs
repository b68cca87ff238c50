//! Adaptive divisor search (Jefferson, Adam, Webster).
//!
//! Looks for a divisor `D` such that the rounded quotas
//! `Σ R(demand_i / D)` equal the capacity exactly, for a rounding
//! rule `R`.
//!
//! # Algorithm
//!
//! 1. Start at `D = standard_divisor + 1` with step `D × k`.
//! 2. If the rounded sum already matches, stop.
//! 3. Move one step toward the target (raise `D` to lower the sum,
//!    lower it to raise the sum) and recompute the step from the new `D`.
//! 4. Repeat: evaluate, stop on an exact match, otherwise step again.
//!    Whenever the direction reverses the step shrinks by `damping`.
//!
//! This is an adaptive step search, not bisection. An exact fit need
//! not exist (e.g. two equal slots and an odd capacity), so the search
//! is bounded by [`SearchConfig`] and may end in [`NonConvergence`].
//!
//! # Reference
//! Balinski & Young (2001), "Fair Representation", Appendix A

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{trace, warn};

use super::{quotas, with_reserved, ApportionmentMethod, MethodResult, Rounding};
use crate::models::MethodFailure;

/// Bounds and tuning constants for divisor search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum search iterations after the initial trial at the standard divisor.
    pub max_iterations: usize,
    /// Optional wall-clock bound, checked before every iteration.
    pub time_limit: Option<Duration>,
    /// Step multiplier applied on every direction reversal.
    pub damping: f64,
    /// Step size as a fraction of the divisor, floor rounding.
    pub floor_step_fraction: f64,
    /// Step size as a fraction of the divisor, other roundings.
    pub step_fraction: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100_000,
            time_limit: None,
            damping: 0.9,
            floor_step_fraction: 0.05,
            step_fraction: 0.01,
        }
    }
}

impl SearchConfig {
    /// Sets the iteration bound.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets a wall-clock bound.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sets the reversal damping factor.
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Sets the step fractions (floor rounding, other roundings).
    pub fn with_step_fractions(mut self, floor: f64, other: f64) -> Self {
        self.floor_step_fraction = floor;
        self.step_fraction = other;
        self
    }

    fn fraction_for(&self, rounding: Rounding) -> f64 {
        match rounding {
            Rounding::Floor => self.floor_step_fraction,
            Rounding::Ceiling | Rounding::Nearest => self.step_fraction,
        }
    }
}

/// A divisor whose rounded quotas sum to the capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct DivisorFit {
    /// The divisor found.
    pub divisor: f64,
    /// Allocation per slot, reserved shift included.
    pub allocation: Vec<u64>,
    /// Iterations used; 0 when the starting divisor already fit.
    pub iterations: usize,
}

/// The search ran out of budget without an exact fit.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("no divisor found after {iterations} iterations (last divisor {divisor}, sum {sum}, target {target})")]
pub struct NonConvergence {
    /// Iterations performed.
    pub iterations: usize,
    /// Divisor at the last evaluation.
    pub divisor: f64,
    /// Rounded sum at the last evaluation.
    pub sum: u64,
    /// Capacity being searched for.
    pub target: u64,
}

/// Divisor method parameterized by its rounding rule.
#[derive(Debug, Clone, PartialEq)]
pub struct DivisorSearch {
    rounding: Rounding,
    config: SearchConfig,
}

impl DivisorSearch {
    /// Creates a divisor method with the given rounding rule.
    pub fn new(rounding: Rounding) -> Self {
        Self {
            rounding,
            config: SearchConfig::default(),
        }
    }

    /// Jefferson's method (round down).
    pub fn jefferson() -> Self {
        Self::new(Rounding::Floor)
    }

    /// Adam's method (round up).
    pub fn adam() -> Self {
        Self::new(Rounding::Ceiling)
    }

    /// Webster's method (round to nearest).
    pub fn webster() -> Self {
        Self::new(Rounding::Nearest)
    }

    /// Sets the search configuration.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Rounding rule in use.
    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// Searches for a divisor fitting `capacity`.
    ///
    /// # Errors
    /// [`NonConvergence`] when the iteration or time budget runs out,
    /// or the divisor is driven to zero.
    pub fn search(
        &self,
        demand: &[u64],
        capacity: u64,
        standard_divisor: f64,
    ) -> Result<DivisorFit, NonConvergence> {
        let fraction = self.config.fraction_for(self.rounding);
        let mut divisor = standard_divisor + 1.0;
        let mut step = divisor * fraction;

        let (seats, mut sum) = self.round_all(demand, divisor);
        if sum == capacity {
            return Ok(DivisorFit {
                divisor,
                allocation: with_reserved(seats),
                iterations: 0,
            });
        }

        let mut decreasing = sum < capacity;
        if decreasing {
            divisor -= step;
        } else {
            divisor += step;
        }
        step = divisor * fraction;

        let started = Instant::now();
        let mut iterations = 0;
        while iterations < self.config.max_iterations {
            if self
                .config
                .time_limit
                .is_some_and(|limit| started.elapsed() >= limit)
            {
                break;
            }
            // Every quota is 0 from here on; the sum can never recover
            if divisor <= 0.0 {
                break;
            }
            iterations += 1;

            let (seats, current) = self.round_all(demand, divisor);
            sum = current;
            trace!(iterations, divisor, sum, target = capacity, "divisor search step");

            if sum == capacity {
                return Ok(DivisorFit {
                    divisor,
                    allocation: with_reserved(seats),
                    iterations,
                });
            }

            if sum > capacity {
                if decreasing {
                    step *= self.config.damping;
                }
                divisor += step;
                decreasing = false;
            } else {
                if !decreasing {
                    step *= self.config.damping;
                }
                divisor -= step;
                decreasing = true;
            }
        }

        Err(NonConvergence {
            iterations,
            divisor,
            sum,
            target: capacity,
        })
    }

    fn round_all(&self, demand: &[u64], divisor: f64) -> (Vec<u64>, u64) {
        let seats: Vec<u64> = quotas(demand, divisor)
            .map(|q| self.rounding.apply(q))
            .collect();
        let sum = seats.iter().fold(0u64, |acc, &s| acc.saturating_add(s));
        (seats, sum)
    }
}

impl ApportionmentMethod for DivisorSearch {
    fn name(&self) -> &'static str {
        match self.rounding {
            Rounding::Floor => "Jefferson",
            Rounding::Ceiling => "Adam",
            Rounding::Nearest => "Webster",
        }
    }

    fn apportion(&self, demand: &[u64], capacity: u64, standard_divisor: f64) -> MethodResult {
        match self.search(demand, capacity, standard_divisor) {
            Ok(fit) => Ok(fit.allocation),
            Err(err) => {
                warn!(method = self.name(), %err, "divisor search did not converge");
                Err(MethodFailure::NotConverged {
                    iterations: err.iterations,
                })
            }
        }
    }

    fn description(&self) -> &'static str {
        match self.rounding {
            Rounding::Floor => "Divisor method, rounding down (Jefferson / D'Hondt)",
            Rounding::Ceiling => "Divisor method, rounding up (Adam)",
            Rounding::Nearest => "Divisor method, rounding to nearest (Webster / Sainte-Laguë)",
        }
    }
}
