//! Persistence actions.

use std::fmt;

/// The persistence action a staged change is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Persist a new record.
    Insert,
    /// Persist changes to an existing record.
    Update,
    /// Remove an existing record.
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Insert => write!(f, "insert"),
            Action::Update => write!(f, "update"),
            Action::Delete => write!(f, "delete"),
        }
    }
}
