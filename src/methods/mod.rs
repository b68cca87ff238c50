//! Apportionment methods.
//!
//! Each method turns a demand vector, a capacity and the standard
//! divisor into a per-slot allocation that includes the one reserved
//! shift per slot.
//!
//! # Families
//!
//! - **Largest remainder**: [`Hamilton`]
//! - **Divisor search**: [`DivisorSearch`] (Jefferson, Adam, Webster)
//! - **Rank index**: [`RankIndex`] (Huntington-Hill, geometric and arithmetic cutoff)
//!
//! # References
//! - Balinski & Young (2001), "Fair Representation", 2nd ed.
//! - Huntington (1928), "The Apportionment of Representatives in Congress"

mod divisor;
mod hamilton;
mod rank_index;

pub use divisor::{DivisorFit, DivisorSearch, NonConvergence, SearchConfig};
pub use hamilton::Hamilton;
pub use rank_index::{Mean, RankIndex};

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::models::MethodFailure;

/// Result of running a single method.
pub type MethodResult = Result<Vec<u64>, MethodFailure>;

/// An apportionment method.
///
/// Implementations are stateless across calls: identical input yields
/// identical output.
pub trait ApportionmentMethod: Send + Sync + Debug {
    /// Method name (e.g., "Hamilton").
    fn name(&self) -> &'static str;

    /// Allocates `capacity` shifts over `demand`, then adds the reserved
    /// shift to every slot.
    ///
    /// `standard_divisor` is `total_demand / capacity`; methods that
    /// perturb it work on a local copy.
    fn apportion(&self, demand: &[u64], capacity: u64, standard_divisor: f64) -> MethodResult;

    /// Method description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Rule for turning a fractional quota into whole shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rounding {
    /// Round down (Jefferson).
    Floor,
    /// Round up (Adam).
    Ceiling,
    /// Round to nearest, ties to even (Webster, rank index).
    Nearest,
}

impl Rounding {
    /// Rounds `quota`, keeping it as a float.
    pub fn round(self, quota: f64) -> f64 {
        match self {
            Rounding::Floor => quota.floor(),
            Rounding::Ceiling => quota.ceil(),
            Rounding::Nearest => quota.round_ties_even(),
        }
    }

    /// Rounds `quota` to whole shifts.
    ///
    /// Negative and NaN quotas clamp to 0, infinite ones to `u64::MAX`.
    pub fn apply(self, quota: f64) -> u64 {
        self.round(quota) as u64
    }
}

/// Quota of every slot under `divisor`.
pub(crate) fn quotas(demand: &[u64], divisor: f64) -> impl Iterator<Item = f64> + '_ {
    demand.iter().map(move |&d| d as f64 / divisor)
}

/// Adds the reserved shift to every slot.
pub(crate) fn with_reserved(mut seats: Vec<u64>) -> Vec<u64> {
    for s in &mut seats {
        *s = s.saturating_add(1);
    }
    seats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_rules() {
        assert_eq!(Rounding::Floor.apply(2.7), 2);
        assert_eq!(Rounding::Ceiling.apply(2.1), 3);
        assert_eq!(Rounding::Ceiling.apply(2.0), 2);
        assert_eq!(Rounding::Nearest.apply(2.4), 2);
        assert_eq!(Rounding::Nearest.apply(2.6), 3);
    }

    #[test]
    fn test_nearest_ties_to_even() {
        assert_eq!(Rounding::Nearest.apply(0.5), 0);
        assert_eq!(Rounding::Nearest.apply(1.5), 2);
        assert_eq!(Rounding::Nearest.apply(2.5), 2);
        assert_eq!(Rounding::Nearest.apply(3.5), 4);
    }

    #[test]
    fn test_rounding_clamps() {
        assert_eq!(Rounding::Floor.apply(-0.3), 0);
        assert_eq!(Rounding::Floor.apply(f64::NAN), 0);
        assert_eq!(Rounding::Floor.apply(f64::INFINITY), u64::MAX);
    }

    #[test]
    fn test_quotas_with_infinite_divisor() {
        let q: Vec<f64> = quotas(&[5, 0, 12], f64::INFINITY).collect();
        assert_eq!(q, vec![0.0, 0.0, 0.0]);
    }
}
