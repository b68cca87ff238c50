//! Hamilton's largest-remainder method.
//!
//! # Algorithm
//!
//! 1. Compute every slot's standard quota `demand / standard_divisor`.
//! 2. Give each slot the floor of its quota.
//! 3. Hand the remaining shifts one at a time to the slots with the
//!    largest fractional remainders. Each slot receives at most one
//!    extra shift; equal remainders go to the earlier slot.
//! 4. Add the reserved shift to every slot.
//!
//! # Complexity
//! O(n log n) for n slots.
//!
//! # Reference
//! Balinski & Young (2001), "Fair Representation", Ch. 2

use super::{quotas, with_reserved, ApportionmentMethod, MethodResult, Rounding};

/// Largest-remainder apportionment. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hamilton;

impl ApportionmentMethod for Hamilton {
    fn name(&self) -> &'static str {
        "Hamilton"
    }

    fn apportion(&self, demand: &[u64], capacity: u64, standard_divisor: f64) -> MethodResult {
        let mut seats = Vec::with_capacity(demand.len());
        let mut remainders = Vec::with_capacity(demand.len());
        for quota in quotas(demand, standard_divisor) {
            let lower = Rounding::Floor.apply(quota);
            seats.push(lower);
            remainders.push(quota - lower as f64);
        }

        let assigned = seats.iter().fold(0u64, |acc, &s| acc.saturating_add(s));
        let surplus = capacity.saturating_sub(assigned);

        // Stable sort: equal remainders keep slot order
        let mut order: Vec<usize> = (0..demand.len()).collect();
        order.sort_by(|&a, &b| remainders[b].total_cmp(&remainders[a]));

        for &slot in order.iter().cycle().take(surplus as usize) {
            seats[slot] += 1;
        }

        Ok(with_reserved(seats))
    }

    fn description(&self) -> &'static str {
        "Largest remainder (Hamilton / Vinton)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn run(demand: &[u64], capacity: u64) -> Vec<u64> {
        let total: u64 = demand.iter().sum();
        Hamilton
            .apportion(demand, capacity, total as f64 / capacity as f64)
            .unwrap()
    }

    #[test]
    fn test_even_split() {
        // 6 shifts over 3 slots: capacity 3, divisor 10
        assert_eq!(run(&[10, 10, 10], 3), vec![2, 2, 2]);
    }

    #[test]
    fn test_largest_remainder_wins() {
        // Quotas 0.3, 0.7, 9.0 → lower 0, 0, 9 → surplus to slot 1
        assert_eq!(run(&[3, 7, 90], 10), vec![1, 2, 10]);
    }

    #[test]
    fn test_tie_goes_to_earlier_slot() {
        // Quotas 0.5, 0.5, 1.0 → one surplus shift, tied remainders
        assert_eq!(run(&[1, 1, 2], 2), vec![2, 1, 2]);
        // Tie between the last two slots
        assert_eq!(run(&[2, 1, 1], 2), vec![2, 2, 1]);
    }

    #[test]
    fn test_slot_gets_at_most_one_surplus() {
        // Quotas 0.75 each: three surplus shifts spread over three slots
        assert_eq!(run(&[1, 1, 1, 1], 3), vec![2, 2, 2, 1]);
    }

    #[test]
    fn test_zero_capacity() {
        let out = Hamilton.apportion(&[4, 9], 0, f64::INFINITY).unwrap();
        assert_eq!(out, vec![1, 1]);
    }

    #[test]
    fn test_zero_demand_slot_keeps_reserved_shift() {
        assert_eq!(run(&[0, 50, 50], 4), vec![1, 3, 3]);
    }

    #[test]
    fn test_random_sums_match_capacity() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..200 {
            let slots: usize = rng.random_range(1..40);
            let demand: Vec<u64> = (0..slots).map(|_| rng.random_range(0..700)).collect();
            if demand.iter().all(|&d| d == 0) {
                continue;
            }
            let capacity = rng.random_range(1..200);
            let out = run(&demand, capacity);
            assert_eq!(out.len(), demand.len());
            assert_eq!(out.iter().sum::<u64>(), capacity + slots as u64);
            assert!(out.iter().all(|&s| s >= 1));
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Hamilton.name(), "Hamilton");
        assert!(Hamilton.description().contains("Largest remainder"));
    }

    #[test]
    fn test_idempotent() {
        let demand = [319, 375, 348, 393, 407, 443];
        assert_eq!(run(&demand, 20), run(&demand, 20));
    }
}
