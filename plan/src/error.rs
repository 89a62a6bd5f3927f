//! Build-time error types.

use lockstep_core::{Action, ActionConflict};
use thiserror::Error;

/// Result type for plan construction.
pub type PlanResult<T> = Result<T, PlanError>;

/// Errors raised while composing a plan.
///
/// These are caller errors, reported synchronously by the builder call that
/// triggered them. Plans are immutable values, so a failed call leaves every
/// existing plan exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Duplicate operation name: {name}")]
    DuplicateName { name: String },

    #[error("Change for {name} already stamped for {existing}, cannot restamp for {requested}")]
    ActionConflict {
        name: String,
        existing: Action,
        requested: Action,
    },

    #[error("Operation names present in both plans: {}", .names.join(", "))]
    NameCollision { names: Vec<String> },
}

impl PlanError {
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    pub fn action_conflict(name: impl Into<String>, conflict: ActionConflict) -> Self {
        Self::ActionConflict {
            name: name.into(),
            existing: conflict.existing,
            requested: conflict.requested,
        }
    }

    pub fn name_collision(names: Vec<String>) -> Self {
        Self::NameCollision { names }
    }
}
