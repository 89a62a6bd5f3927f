//! Integration test harness for Lockstep.
//!
//! Provides an in-memory stub store with a call log, plus the change and
//! value types the scenario tests share.

pub mod store;

/// Commonly used test imports.
pub mod prelude {
    pub use crate::store::{Draft, MemStore, Val};
    pub use lockstep_core::{Action, Change, Results, Store};
    pub use lockstep_exec::{execute, ExecError};
    pub use lockstep_plan::{Op, Plan, PlanError};
}
