//! The contract a backing data store must satisfy.
//!
//! The plan engine never talks to storage directly. It issues persist and
//! bulk calls through this trait, one at a time, and delegates the
//! transaction boundary to [`Store::transaction`]: the store opens a
//! transaction, runs the body, commits when the body returns `Ok`, and rolls
//! back when it returns `Err`. Locking, isolation, timeouts, and retries are
//! entirely the store's concern.

use crate::{Action, Change};

/// A backing data store.
pub trait Store {
    /// Staged mutation descriptor accepted by [`Store::persist`].
    type Change: Change + Clone;
    /// Resolved query descriptor targeting existing records.
    type Query;
    /// Update expression applied by [`Store::update_all`].
    type Update;
    /// Raw entry accepted by [`Store::insert_all`].
    type Row;
    /// Per-operation options passed through unchanged.
    type Opts: Default;
    /// Value produced by a successful store call.
    type Value: Clone;
    /// Failure value produced by a rejected persist or run step.
    type Error;

    /// Persist one staged change for `action`.
    fn persist(
        &mut self,
        action: Action,
        change: &Self::Change,
        opts: &Self::Opts,
    ) -> Result<Self::Value, Self::Error>;

    /// Bulk-insert `rows` into `target`.
    ///
    /// Bulk operations carry no failure channel; anything they raise is a
    /// fatal condition, not a named step failure.
    fn insert_all(&mut self, target: &str, rows: &[Self::Row], opts: &Self::Opts) -> Self::Value;

    /// Bulk-update the records matched by `query`.
    fn update_all(
        &mut self,
        query: &Self::Query,
        update: &Self::Update,
        opts: &Self::Opts,
    ) -> Self::Value;

    /// Bulk-delete the records matched by `query`.
    fn delete_all(&mut self, query: &Self::Query, opts: &Self::Opts) -> Self::Value;

    /// Run `body` inside one transaction.
    ///
    /// Commits when `body` returns `Ok`, rolls back when it returns `Err`,
    /// and returns the body's result unchanged either way.
    fn transaction<T, E>(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<T, E>;
}
