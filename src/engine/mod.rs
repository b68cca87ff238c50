//! Apportionment dispatch and cross-method comparison.
//!
//! # Dispatch
//!
//! [`Apportioner`] derives capacity and the standard divisor, runs the
//! selected methods and always returns six outcomes.
//!
//! # Comparison
//!
//! [`Comparison`] measures every successful method against the per-slot
//! maximum across methods.

mod dispatcher;
mod report;

pub use dispatcher::Apportioner;
pub use report::{Comparison, MethodDeviation};
