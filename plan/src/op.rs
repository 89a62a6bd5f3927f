//! The closed set of operation variants a plan can hold.

use std::fmt;
use std::sync::Arc;

use lockstep_core::{Action, Results, Store};

use crate::Plan;

/// One named unit of work inside a plan.
///
/// Variants holding functions store them behind `Arc` so that plans stay
/// cheap to clone; the executor calls each stored function at most once per
/// run.
pub enum Op<S: Store> {
    /// Persist an eagerly built staged change, already stamped for `action`.
    Mutation {
        action: Action,
        change: S::Change,
        opts: S::Opts,
    },
    /// Persist a change built at execution time from earlier results;
    /// stamped for `action` once built.
    MutationFn {
        action: Action,
        build: Arc<dyn Fn(&Results<S::Value>) -> S::Change>,
        opts: S::Opts,
    },
    /// Run an arbitrary function against the store and earlier results.
    Run {
        run: Arc<dyn Fn(&mut S, &Results<S::Value>) -> Result<S::Value, S::Error>>,
    },
    /// Run a plain function with fixed extra arguments; earlier results are
    /// passed ahead of the arguments.
    RunRef {
        fun: fn(&mut S, &Results<S::Value>, &[S::Value]) -> Result<S::Value, S::Error>,
        args: Vec<S::Value>,
    },
    /// Bulk-insert rows into a target source.
    InsertAll {
        target: String,
        rows: Vec<S::Row>,
        opts: S::Opts,
    },
    /// Bulk-update the records matched by an eagerly resolved query.
    UpdateAll {
        query: S::Query,
        update: S::Update,
        opts: S::Opts,
    },
    /// Bulk-delete the records matched by an eagerly resolved query.
    DeleteAll { query: S::Query, opts: S::Opts },
    /// Bind a precomputed value for later steps to read.
    Put { value: S::Value },
    /// Build a sub-plan at execution time from earlier results and splice
    /// its operations into the run.
    Expand {
        build: Arc<dyn Fn(&Results<S::Value>) -> Plan<S>>,
    },
    /// Log the names bound so far; binds nothing.
    Inspect,
}

impl<S: Store> Op<S> {
    /// Short tag naming the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Op::Mutation { .. } => "mutation",
            Op::MutationFn { .. } => "mutation_fn",
            Op::Run { .. } => "run",
            Op::RunRef { .. } => "run_ref",
            Op::InsertAll { .. } => "insert_all",
            Op::UpdateAll { .. } => "update_all",
            Op::DeleteAll { .. } => "delete_all",
            Op::Put { .. } => "put",
            Op::Expand { .. } => "expand",
            Op::Inspect => "inspect",
        }
    }

    /// The persistence action this operation is destined for, if it is a
    /// mutation.
    pub fn action(&self) -> Option<Action> {
        match self {
            Op::Mutation { action, .. } | Op::MutationFn { action, .. } => Some(*action),
            _ => None,
        }
    }
}

impl<S: Store> fmt::Debug for Op<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Mutation { action, .. } => write!(f, "Mutation({action})"),
            Op::MutationFn { action, .. } => write!(f, "MutationFn({action})"),
            Op::Run { .. } => write!(f, "Run"),
            Op::RunRef { args, .. } => write!(f, "RunRef(args: {})", args.len()),
            Op::InsertAll { target, rows, .. } => {
                write!(f, "InsertAll({target}, rows: {})", rows.len())
            }
            Op::UpdateAll { .. } => write!(f, "UpdateAll"),
            Op::DeleteAll { .. } => write!(f, "DeleteAll"),
            Op::Put { .. } => write!(f, "Put"),
            Op::Expand { .. } => write!(f, "Expand"),
            Op::Inspect => write!(f, "Inspect"),
        }
    }
}
