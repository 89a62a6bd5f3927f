//! The engine's view of a staged mutation descriptor.
//!
//! Changes are built and validated elsewhere; the plan engine only reads
//! their validity flag and stamps them with the action a builder call
//! intends. Stamping never mutates a shared descriptor in place: it consumes
//! the change and returns a new value, so conflicts surface as errors rather
//! than silent overwrites.

use crate::Action;
use thiserror::Error;

/// A change was already stamped for one action and a builder call tried to
/// stamp it for a different one.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Change already stamped for {existing}, cannot restamp for {requested}")]
pub struct ActionConflict {
    /// The action the change already carries.
    pub existing: Action,
    /// The action the current call tried to apply.
    pub requested: Action,
}

/// A staged mutation descriptor, as seen by the plan engine.
///
/// Implementors track field-level validity themselves; the engine reads only
/// the overall flag and the intended action.
pub trait Change: Sized {
    /// Whether the staged change is statically known to be applicable.
    fn is_valid(&self) -> bool;

    /// The action the change is already stamped for, if any.
    fn action(&self) -> Option<Action>;

    /// Return this change stamped for `action`, unconditionally.
    fn with_action(self, action: Action) -> Self;

    /// Stamp this change for `action`.
    ///
    /// An unstamped change is stamped; a change already stamped for the same
    /// action passes through unchanged; a change stamped for a different
    /// action is a caller error.
    fn stamp(self, action: Action) -> Result<Self, ActionConflict> {
        match self.action() {
            None => Ok(self.with_action(action)),
            Some(existing) if existing == action => Ok(self),
            Some(existing) => Err(ActionConflict {
                existing,
                requested: action,
            }),
        }
    }
}
