//! The immutable plan value and its builder surface.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use lockstep_core::{Action, Change, Results, Store};

use crate::error::{PlanError, PlanResult};
use crate::op::Op;

/// An immutable, ordered collection of named operations.
///
/// Every builder call takes `&self` and returns a new plan, so a failed call
/// leaves the original untouched and a plan can be shared or forked freely.
/// The operation list and the name registry are two views of one logical
/// collection, kept consistent by construction.
pub struct Plan<S: Store> {
    pub(crate) operations: Vec<(String, Arc<Op<S>>)>,
    pub(crate) names: BTreeSet<String>,
}

impl<S: Store> Plan<S> {
    /// Create an empty plan.
    pub fn new() -> Self {
        Self {
            operations: Vec::new(),
            names: BTreeSet::new(),
        }
    }

    /// Number of declared operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether no operations are declared.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// The registry of declared names.
    pub fn names(&self) -> &BTreeSet<String> {
        &self.names
    }

    /// Iterate over `(name, operation)` pairs in declaration order.
    pub fn ops(&self) -> impl Iterator<Item = (&str, &Op<S>)> {
        self.operations
            .iter()
            .map(|(name, op)| (name.as_str(), op.as_ref()))
    }

    /// The operations in declaration order.
    ///
    /// Pure and side-effect free; mutation entries surface their resolved
    /// `(action, change, opts)` payload for inspection. Safe to call at any
    /// point, including before validation.
    pub fn to_list(&self) -> Vec<(&str, &Op<S>)> {
        self.ops().collect()
    }

    /// Declare persisting an eagerly built insert.
    ///
    /// Accepts anything convertible into the store's change type, so a raw
    /// record value can stand in for an unvalidated change with no field
    /// edits. Fails with [`PlanError::ActionConflict`] if the change is
    /// already stamped for a different action.
    pub fn insert(
        &self,
        name: impl Into<String>,
        change: impl Into<S::Change>,
        opts: S::Opts,
    ) -> PlanResult<Self> {
        self.mutation(name.into(), Action::Insert, change.into(), opts)
    }

    /// Declare persisting an eagerly built update.
    pub fn update(&self, name: impl Into<String>, change: S::Change, opts: S::Opts) -> PlanResult<Self> {
        self.mutation(name.into(), Action::Update, change, opts)
    }

    /// Declare persisting an eagerly built delete.
    ///
    /// Accepts a raw record value the same way [`Plan::insert`] does.
    pub fn delete(
        &self,
        name: impl Into<String>,
        change: impl Into<S::Change>,
        opts: S::Opts,
    ) -> PlanResult<Self> {
        self.mutation(name.into(), Action::Delete, change.into(), opts)
    }

    /// Declare an insert whose change is built at execution time from
    /// earlier results.
    pub fn insert_with(
        &self,
        name: impl Into<String>,
        build: impl Fn(&Results<S::Value>) -> S::Change + 'static,
        opts: S::Opts,
    ) -> PlanResult<Self> {
        self.mutation_with(name.into(), Action::Insert, build, opts)
    }

    /// Declare an update whose change is built at execution time.
    pub fn update_with(
        &self,
        name: impl Into<String>,
        build: impl Fn(&Results<S::Value>) -> S::Change + 'static,
        opts: S::Opts,
    ) -> PlanResult<Self> {
        self.mutation_with(name.into(), Action::Update, build, opts)
    }

    /// Declare a delete whose change is built at execution time.
    pub fn delete_with(
        &self,
        name: impl Into<String>,
        build: impl Fn(&Results<S::Value>) -> S::Change + 'static,
        opts: S::Opts,
    ) -> PlanResult<Self> {
        self.mutation_with(name.into(), Action::Delete, build, opts)
    }

    /// Declare an arbitrary step.
    ///
    /// The function receives the store handle and the results accumulated so
    /// far, and signals success or failure through its return value.
    pub fn run(
        &self,
        name: impl Into<String>,
        run: impl Fn(&mut S, &Results<S::Value>) -> Result<S::Value, S::Error> + 'static,
    ) -> PlanResult<Self> {
        self.add(name.into(), Op::Run { run: Arc::new(run) })
    }

    /// Declare an arbitrary step as a plain function plus fixed arguments.
    ///
    /// At execution the accumulated results are passed ahead of `args`.
    pub fn run_ref(
        &self,
        name: impl Into<String>,
        fun: fn(&mut S, &Results<S::Value>, &[S::Value]) -> Result<S::Value, S::Error>,
        args: Vec<S::Value>,
    ) -> PlanResult<Self> {
        self.add(name.into(), Op::RunRef { fun, args })
    }

    /// Declare a bulk insert of `rows` into `target`.
    pub fn insert_all(
        &self,
        name: impl Into<String>,
        target: impl Into<String>,
        rows: Vec<S::Row>,
        opts: S::Opts,
    ) -> PlanResult<Self> {
        self.add(
            name.into(),
            Op::InsertAll {
                target: target.into(),
                rows,
                opts,
            },
        )
    }

    /// Declare a bulk update over the records matched by `query`.
    ///
    /// The queryable is resolved to the store's query descriptor here, at
    /// declaration time, not when the plan runs.
    pub fn update_all(
        &self,
        name: impl Into<String>,
        query: impl Into<S::Query>,
        update: S::Update,
        opts: S::Opts,
    ) -> PlanResult<Self> {
        self.add(
            name.into(),
            Op::UpdateAll {
                query: query.into(),
                update,
                opts,
            },
        )
    }

    /// Declare a bulk delete over the records matched by `query`.
    pub fn delete_all(
        &self,
        name: impl Into<String>,
        query: impl Into<S::Query>,
        opts: S::Opts,
    ) -> PlanResult<Self> {
        self.add(
            name.into(),
            Op::DeleteAll {
                query: query.into(),
                opts,
            },
        )
    }

    /// Bind a precomputed value under `name` for later steps to read.
    pub fn put(&self, name: impl Into<String>, value: S::Value) -> PlanResult<Self> {
        self.add(name.into(), Op::Put { value })
    }

    /// Declare a sub-plan built at execution time from earlier results.
    ///
    /// The sub-plan's operations run in order at this position and their
    /// results merge flat into the accumulator; its names must not collide
    /// with any name already declared or expanded.
    pub fn expand(
        &self,
        name: impl Into<String>,
        build: impl Fn(&Results<S::Value>) -> Plan<S> + 'static,
    ) -> PlanResult<Self> {
        self.add(
            name.into(),
            Op::Expand {
                build: Arc::new(build),
            },
        )
    }

    /// Declare a diagnostic step that logs the names bound so far.
    pub fn inspect(&self, name: impl Into<String>) -> PlanResult<Self> {
        self.add(name.into(), Op::Inspect)
    }

    fn mutation(
        &self,
        name: String,
        action: Action,
        change: S::Change,
        opts: S::Opts,
    ) -> PlanResult<Self> {
        let change = change
            .stamp(action)
            .map_err(|conflict| PlanError::action_conflict(name.clone(), conflict))?;
        self.add(
            name,
            Op::Mutation {
                action,
                change,
                opts,
            },
        )
    }

    fn mutation_with(
        &self,
        name: String,
        action: Action,
        build: impl Fn(&Results<S::Value>) -> S::Change + 'static,
        opts: S::Opts,
    ) -> PlanResult<Self> {
        self.add(
            name,
            Op::MutationFn {
                action,
                build: Arc::new(build),
                opts,
            },
        )
    }

    /// Append one operation, checking name uniqueness first.
    ///
    /// The check and the append are atomic with respect to each other: on
    /// failure no new plan exists and `self` is untouched.
    fn add(&self, name: String, op: Op<S>) -> PlanResult<Self> {
        if self.names.contains(&name) {
            return Err(PlanError::duplicate_name(name));
        }
        let mut next = self.clone();
        next.names.insert(name.clone());
        next.operations.push((name, Arc::new(op)));
        Ok(next)
    }
}

impl<S: Store> Clone for Plan<S> {
    fn clone(&self) -> Self {
        Self {
            operations: self.operations.clone(),
            names: self.names.clone(),
        }
    }
}

impl<S: Store> Default for Plan<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Store> fmt::Debug for Plan<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Plan")?;
        f.debug_list().entries(self.ops()).finish()
    }
}
