//! Failure report values returned by `execute`.

use std::error;
use std::fmt;

use lockstep_core::{Action, Results};

/// Why an execution attempt committed nothing.
///
/// These are explicit return values, not raised faults: every variant
/// carries the failing operation's name and the results accumulated before
/// it, which is enough context to diagnose and retry at a higher level.
/// `C`, `V`, and `E` are the store's change, value, and failure types.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecError<C, V, E> {
    /// Pre-flight found a mutation payload already marked invalid; no
    /// transaction was opened and `partial` is empty.
    Invalid {
        name: String,
        change: C,
        partial: Results<V>,
    },
    /// A step signaled failure mid-run; the transaction rolled back.
    Step {
        name: String,
        error: E,
        partial: Results<V>,
    },
    /// A lazily built change was already stamped for a different action;
    /// the transaction rolled back.
    ActionConflict {
        name: String,
        existing: Action,
        requested: Action,
        partial: Results<V>,
    },
    /// An expanded sub-plan reused a name already declared or bound; the
    /// transaction rolled back.
    NameCollision { name: String, partial: Results<V> },
}

impl<C, V, E> ExecError<C, V, E> {
    /// The name of the operation the run failed on.
    pub fn name(&self) -> &str {
        match self {
            ExecError::Invalid { name, .. }
            | ExecError::Step { name, .. }
            | ExecError::ActionConflict { name, .. }
            | ExecError::NameCollision { name, .. } => name,
        }
    }

    /// The results accumulated before the failing operation.
    pub fn partial(&self) -> &Results<V> {
        match self {
            ExecError::Invalid { partial, .. }
            | ExecError::Step { partial, .. }
            | ExecError::ActionConflict { partial, .. }
            | ExecError::NameCollision { partial, .. } => partial,
        }
    }
}

impl<C, V, E> fmt::Display for ExecError<C, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecError::Invalid { name, .. } => {
                write!(f, "Operation {name} holds an invalid change")
            }
            ExecError::Step { name, .. } => write!(f, "Operation {name} failed"),
            ExecError::ActionConflict {
                name,
                existing,
                requested,
                ..
            } => write!(
                f,
                "Change for {name} already stamped for {existing}, cannot restamp for {requested}"
            ),
            ExecError::NameCollision { name, .. } => {
                write!(f, "Expanded sub-plan reuses operation name: {name}")
            }
        }
    }
}

impl<C, V, E> error::Error for ExecError<C, V, E>
where
    C: fmt::Debug,
    V: fmt::Debug,
    E: fmt::Debug,
{
}
