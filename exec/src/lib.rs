//! Lockstep Exec
//!
//! Run a composed plan as one atomic unit against a backing store.
//!
//! Responsibilities:
//! - Pre-flight the plan for statically invalid mutation payloads before
//!   any store interaction
//! - Fold operations strictly in declaration order inside one transaction,
//!   threading named results from earlier steps to later ones
//! - Short-circuit on the first failure, reporting the failing name, its
//!   failure value, and everything computed before it
//! - Delegate commit/rollback entirely to the store's transaction wrap
//!
//! # Module Structure
//!
//! - `preflight` - Validation pass over eagerly built mutation payloads
//! - `executor` - The sequential transactional executor
//! - `error` - Failure report values returned by `execute`

mod error;
mod executor;
mod preflight;

pub use error::ExecError;
pub use executor::{execute, RunState};
pub use preflight::preflight;
