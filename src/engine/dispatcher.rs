//! Apportionment dispatcher.
//!
//! # Algorithm
//!
//! 1. Derive capacity (`total_shifts − slot_count`), rejecting negatives.
//! 2. Derive the standard divisor `total_demand / capacity` once.
//! 3. Run every selected method against the same divisor.
//! 4. Normalize any method that fails, or returns the wrong number of
//!    slots, into a zero-filled outcome with `success = false`.
//!
//! The result always holds six outcomes in canonical order.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::ApportionError;
use crate::methods::{ApportionmentMethod, DivisorSearch, Hamilton, RankIndex, SearchConfig};
use crate::models::{ApportionRequest, Apportionment, Method, MethodFailure, MethodOutcome};

/// Runs the selected apportionment methods over one request.
///
/// # Example
///
/// ```
/// use u_apportion::engine::Apportioner;
/// use u_apportion::models::{ApportionRequest, Method};
///
/// // 3 TAs × 2 shifts over 3 slots
/// let request = ApportionRequest::new(vec![10, 10, 10], 3, 2);
/// let result = Apportioner::new().apportion(&request).unwrap();
///
/// assert_eq!(result.outcomes.len(), 6);
/// assert_eq!(result.outcome(Method::Hamilton).allocation, vec![2, 2, 2]);
/// ```
#[derive(Clone)]
pub struct Apportioner {
    methods: [Arc<dyn ApportionmentMethod>; 6],
}

impl Apportioner {
    /// Creates a dispatcher with the default search configuration.
    pub fn new() -> Self {
        Self::with_search_config(SearchConfig::default())
    }

    /// Creates a dispatcher whose divisor methods use `config`.
    pub fn with_search_config(config: SearchConfig) -> Self {
        Self {
            methods: [
                Arc::new(Hamilton),
                Arc::new(DivisorSearch::jefferson().with_config(config.clone())),
                Arc::new(DivisorSearch::adam().with_config(config.clone())),
                Arc::new(DivisorSearch::webster().with_config(config)),
                Arc::new(RankIndex::geometric()),
                Arc::new(RankIndex::arithmetic()),
            ],
        }
    }

    /// Replaces the implementation used for `method`.
    pub fn with_method<M: ApportionmentMethod + 'static>(mut self, method: Method, imp: M) -> Self {
        self.methods[method.index()] = Arc::new(imp);
        self
    }

    /// Implementation registered for `method`.
    pub fn method(&self, method: Method) -> &dyn ApportionmentMethod {
        self.methods[method.index()].as_ref()
    }

    /// Apportions the request's capacity with every selected method.
    ///
    /// # Errors
    /// - [`ApportionError::NoSlots`] for an empty demand vector
    /// - [`ApportionError::NegativeCapacity`] when total shifts < slots
    /// - [`ApportionError::DemandOverflow`] when total demand exceeds `u64`
    /// - [`ApportionError::NoDemand`] when demand is all zero but
    ///   shifts remain to distribute
    pub fn apportion(&self, request: &ApportionRequest) -> Result<Apportionment, ApportionError> {
        if request.demand.is_empty() {
            return Err(ApportionError::NoSlots);
        }
        let capacity = request.capacity()?;
        let total_demand = request.total_demand()?;
        if total_demand == 0 && capacity > 0 {
            return Err(ApportionError::NoDemand { capacity });
        }

        let standard_divisor = if capacity == 0 {
            f64::INFINITY
        } else {
            total_demand as f64 / capacity as f64
        };
        let slot_count = request.slot_count();

        debug!(
            slots = slot_count,
            total_demand, capacity, standard_divisor, "apportioning shifts"
        );

        let outcomes = Method::ALL
            .into_iter()
            .map(|method| {
                if !request.selection.contains(method) {
                    return MethodOutcome::failed(method, MethodFailure::NotRequested, slot_count);
                }
                let result =
                    self.method(method)
                        .apportion(&request.demand, capacity, standard_divisor);
                Self::normalize(method, result, slot_count)
            })
            .collect();

        Ok(Apportionment {
            total_demand,
            capacity,
            standard_divisor,
            outcomes,
        })
    }

    fn normalize(
        method: Method,
        result: Result<Vec<u64>, MethodFailure>,
        slot_count: usize,
    ) -> MethodOutcome {
        match result {
            Ok(allocation) if allocation.len() == slot_count => {
                debug!(method = method.name(), ?allocation, "method allocated");
                MethodOutcome::allocated(method, allocation)
            }
            Ok(allocation) => {
                warn!(
                    method = method.name(),
                    expected = slot_count,
                    actual = allocation.len(),
                    "method returned a malformed allocation"
                );
                MethodOutcome::failed(
                    method,
                    MethodFailure::Malformed {
                        expected: slot_count,
                        actual: allocation.len(),
                    },
                    slot_count,
                )
            }
            Err(failure) => MethodOutcome::failed(method, failure, slot_count),
        }
    }
}

impl Default for Apportioner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Apportioner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Apportioner")
            .field(
                "methods",
                &self.methods.iter().map(|m| m.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
