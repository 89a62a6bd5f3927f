//! Lockstep Plan
//!
//! Compose named data-mutation steps into an immutable, ordered plan.
//!
//! Responsibilities:
//! - Declare operations (persist a staged change, bulk write, run a
//!   function) under caller-chosen unique names
//! - Keep declaration order and name uniqueness consistent by construction
//! - Combine two plans with append/prepend when their names are disjoint
//! - Surface the full operation list for inspection before anything runs
//!
//! # Module Structure
//!
//! - `op` - The closed set of operation variants
//! - `plan` - The immutable `Plan` value and its builder surface
//! - `merge` - Append/prepend combinators over two plans
//! - `error` - Build-time error types

mod error;
mod merge;
mod op;
mod plan;

pub use error::{PlanError, PlanResult};
pub use op::Op;
pub use plan::Plan;
