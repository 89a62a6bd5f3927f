//! The sequential transactional executor.

use std::collections::BTreeSet;
use std::mem;

use lockstep_core::{Change, Results, Store};
use lockstep_plan::{Op, Plan};
use tracing::{debug, debug_span, warn};

use crate::error::ExecError;
use crate::preflight::preflight;

/// Phases of one execution run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Pre-flight validation, before any store interaction.
    Validating,
    /// Folding operations inside the store transaction.
    Executing,
    /// The fold completed and the transaction committed.
    Succeeded,
    /// A step failed and the transaction rolled back.
    Failed,
}

/// Run every operation of `plan` in declaration order inside one store
/// transaction.
///
/// Pre-flight rejection returns before the transaction opens. Otherwise the
/// fold threads an accumulator of named results through the operations; the
/// first failure stops the fold and the returned `Err` makes the store roll
/// back. A completed fold commits and yields the final accumulator, with
/// every operation's success value bound under its name.
pub fn execute<S: Store>(
    plan: &Plan<S>,
    store: &mut S,
) -> Result<Results<S::Value>, ExecError<S::Change, S::Value, S::Error>> {
    let span = debug_span!("execute", ops = plan.len());
    let _guard = span.enter();

    debug!(state = ?RunState::Validating, "pre-flight over eager mutation payloads");
    if let Err(failure) = preflight(plan) {
        warn!(name = failure.name(), state = ?RunState::Failed, "pre-flight rejected plan");
        return Err(failure);
    }

    debug!(state = ?RunState::Executing, "opening transaction");
    let result: Result<_, ExecError<S::Change, S::Value, S::Error>> =
        store.transaction(|store| {
        let mut fold = Fold {
            store,
            reserved: plan.names().clone(),
            acc: Results::new(),
        };
        fold.apply_plan(plan)?;
        Ok(fold.acc)
    });

    match &result {
        Ok(results) => {
            debug!(state = ?RunState::Succeeded, results = results.len(), "run committed");
        }
        Err(failure) => {
            warn!(name = failure.name(), state = ?RunState::Failed, "run rolled back");
        }
    }
    result
}

/// The in-transaction fold over a plan's operations.
struct Fold<'s, S: Store> {
    store: &'s mut S,
    /// Every name declared so far, including ones not yet executed; expanded
    /// sub-plans must not reuse any of them.
    reserved: BTreeSet<String>,
    acc: Results<S::Value>,
}

impl<'s, S: Store> Fold<'s, S> {
    fn apply_plan(
        &mut self,
        plan: &Plan<S>,
    ) -> Result<(), ExecError<S::Change, S::Value, S::Error>> {
        for (name, op) in plan.ops() {
            self.apply_op(name, op)?;
        }
        Ok(())
    }

    fn apply_op(
        &mut self,
        name: &str,
        op: &Op<S>,
    ) -> Result<(), ExecError<S::Change, S::Value, S::Error>> {
        match op {
            Op::Mutation {
                action,
                change,
                opts,
            } => {
                let value = self
                    .store
                    .persist(*action, change, opts)
                    .map_err(|error| self.step_failure(name, error))?;
                self.acc.insert(name, value);
            }
            Op::MutationFn {
                action,
                build,
                opts,
            } => {
                let change = build(&self.acc).stamp(*action).map_err(|conflict| {
                    ExecError::ActionConflict {
                        name: name.to_string(),
                        existing: conflict.existing,
                        requested: conflict.requested,
                        partial: mem::take(&mut self.acc),
                    }
                })?;
                let value = self
                    .store
                    .persist(*action, &change, opts)
                    .map_err(|error| self.step_failure(name, error))?;
                self.acc.insert(name, value);
            }
            Op::Run { run } => {
                let value = run(self.store, &self.acc)
                    .map_err(|error| self.step_failure(name, error))?;
                self.acc.insert(name, value);
            }
            Op::RunRef { fun, args } => {
                let value = fun(self.store, &self.acc, args)
                    .map_err(|error| self.step_failure(name, error))?;
                self.acc.insert(name, value);
            }
            Op::InsertAll {
                target,
                rows,
                opts,
            } => {
                // Bulk calls carry no failure channel; anything they raise
                // is fatal rather than a named step failure.
                let value = self.store.insert_all(target, rows, opts);
                self.acc.insert(name, value);
            }
            Op::UpdateAll {
                query,
                update,
                opts,
            } => {
                let value = self.store.update_all(query, update, opts);
                self.acc.insert(name, value);
            }
            Op::DeleteAll { query, opts } => {
                let value = self.store.delete_all(query, opts);
                self.acc.insert(name, value);
            }
            Op::Put { value } => {
                self.acc.insert(name, value.clone());
            }
            Op::Expand { build } => {
                let sub = build(&self.acc);
                for sub_name in sub.names() {
                    if self.reserved.contains(sub_name) {
                        return Err(ExecError::NameCollision {
                            name: sub_name.clone(),
                            partial: mem::take(&mut self.acc),
                        });
                    }
                }
                self.reserved.extend(sub.names().iter().cloned());
                self.apply_plan(&sub)?;
            }
            Op::Inspect => {
                let bound: Vec<&str> = self.acc.keys().collect();
                debug!(name, ?bound, "inspect");
            }
        }
        Ok(())
    }

    fn step_failure(
        &mut self,
        name: &str,
        error: S::Error,
    ) -> ExecError<S::Change, S::Value, S::Error> {
        ExecError::Step {
            name: name.to_string(),
            error,
            partial: mem::take(&mut self.acc),
        }
    }
}
