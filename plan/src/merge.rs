//! Append/prepend combinators over two plans.

use lockstep_core::Store;

use crate::error::{PlanError, PlanResult};
use crate::plan::Plan;

/// Which side of the join runs first.
#[derive(Debug, Clone, Copy)]
enum Order {
    /// `self` first, then the other plan.
    SelfFirst,
    /// The other plan first, then `self`.
    OtherFirst,
}

impl<S: Store> Plan<S> {
    /// A plan running `self`'s operations followed by `other`'s.
    ///
    /// Defined only when the two name registries are disjoint; fails with
    /// [`PlanError::NameCollision`] listing every colliding name, leaving
    /// both inputs unchanged.
    pub fn append(&self, other: &Self) -> PlanResult<Self> {
        self.join(other, Order::SelfFirst)
    }

    /// A plan running `other`'s operations followed by `self`'s.
    ///
    /// Same disjointness rule as [`Plan::append`].
    pub fn prepend(&self, other: &Self) -> PlanResult<Self> {
        self.join(other, Order::OtherFirst)
    }

    fn join(&self, other: &Self, order: Order) -> PlanResult<Self> {
        let colliding: Vec<String> = self
            .names
            .intersection(&other.names)
            .cloned()
            .collect();
        if !colliding.is_empty() {
            return Err(PlanError::name_collision(colliding));
        }

        let (first, second) = match order {
            Order::SelfFirst => (self, other),
            Order::OtherFirst => (other, self),
        };
        Ok(Plan {
            operations: first
                .operations
                .iter()
                .chain(second.operations.iter())
                .cloned()
                .collect(),
            names: self.names.union(&other.names).cloned().collect(),
        })
    }
}
