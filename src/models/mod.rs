//! Apportionment domain models.
//!
//! Provides the data types for describing an apportionment run and
//! its results.
//!
//! # Domain Mappings
//!
//! | u-apportion | Staffing | Legislature |
//! |-------------|----------|-------------|
//! | Slot | Time slot | State |
//! | Demand | Students seen | Population |
//! | Shift | TA shift | Seat |
//! | Capacity | Shifts after reservation | House size |

mod method;
mod outcome;
mod request;

pub use method::{Method, MethodSelection, UnknownMethod};
pub use outcome::{Apportionment, MethodFailure, MethodOutcome};
pub use request::ApportionRequest;
