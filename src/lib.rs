//! Shift apportionment for the U-Engine ecosystem.
//!
//! Distributes a fixed number of TA shifts across time slots in
//! proportion to student demand, after reserving one shift per slot.
//! Six classical methods are run side by side so their outcomes can
//! be compared.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ApportionRequest`, `Method`,
//!   `MethodSelection`, `MethodOutcome`, `Apportionment`
//! - **`methods`**: Hamilton, divisor search (Jefferson, Adam, Webster),
//!   rank index (Huntington-Hill)
//! - **`engine`**: `Apportioner` dispatcher and `Comparison` report
//! - **`validation`**: Checks on raw, signed input
//!
//! # Example
//!
//! ```
//! use u_apportion::models::Method;
//!
//! let result = u_apportion::apportion(&[3, 7, 90], 13, 1).unwrap();
//! assert_eq!(result.outcome(Method::Hamilton).allocation, vec![1, 2, 10]);
//! assert_eq!(result.outcome(Method::Jefferson).allocation, vec![1, 1, 11]);
//! ```
//!
//! # References
//!
//! - Balinski & Young (2001), "Fair Representation", 2nd ed.
//! - Huntington (1928), "The Apportionment of Representatives in Congress"

pub mod engine;
pub mod error;
pub mod methods;
pub mod models;
pub mod validation;

pub use error::ApportionError;

use engine::Apportioner;
use models::{ApportionRequest, Apportionment};

/// Validates raw input and runs all six methods with default settings.
///
/// # Errors
/// [`ApportionError::Invalid`] for rejected input, or any dispatch
/// precondition failure.
pub fn apportion(demand: &[i64], ta_count: i64, shifts_per_ta: i64) -> Result<Apportionment, ApportionError> {
    let request = ApportionRequest::from_raw(demand, ta_count, shifts_per_ta)?;
    Apportioner::new().apportion(&request)
}
