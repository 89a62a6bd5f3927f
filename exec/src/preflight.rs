//! Pre-flight validation over eagerly built mutation payloads.

use lockstep_core::{Change, Results, Store};
use lockstep_plan::{Op, Plan};

use crate::ExecError;

/// Reject a plan whose eager mutation payloads are statically invalid.
///
/// Scans in declaration order and fails on the first `Op::Mutation` whose
/// change reports itself invalid, before any store interaction; nothing
/// executes, not even operations preceding it. Lazily built payloads
/// (`MutationFn`, `Expand`) are not checked here: their changes do not exist
/// until invoked with prior results. That gap is a documented limitation of
/// this pass, not an oversight.
pub fn preflight<S: Store>(
    plan: &Plan<S>,
) -> Result<(), ExecError<S::Change, S::Value, S::Error>> {
    for (name, op) in plan.ops() {
        if let Op::Mutation { change, .. } = op {
            if !change.is_valid() {
                return Err(ExecError::Invalid {
                    name: name.to_string(),
                    change: change.clone(),
                    partial: Results::new(),
                });
            }
        }
    }
    Ok(())
}
