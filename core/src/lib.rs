//! Lockstep Core Types
//!
//! This crate provides the foundational types used throughout the Lockstep
//! system:
//! - The persistence `Action` enum (insert/update/delete)
//! - The `Change` trait, the engine's read-only view of a staged mutation
//!   descriptor, with side-effect-free action stamping
//! - The `Store` trait, the contract a backing data store must satisfy
//!   (persist, bulk writes, transaction wrapping)
//! - The `Results` accumulator threading named step values through a run

mod action;
mod change;
mod results;
mod store;

pub use action::*;
pub use change::*;
pub use results::*;
pub use store::*;
