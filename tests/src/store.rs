//! An in-memory stub store recording every call it receives.

use lockstep_core::{Action, Change, Store};

/// A staged change over a single named record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub record: String,
    pub valid: bool,
    pub action: Option<Action>,
}

impl Draft {
    /// A valid, unstamped change.
    pub fn valid(record: impl Into<String>) -> Self {
        Self {
            record: record.into(),
            valid: true,
            action: None,
        }
    }

    /// A change already marked invalid by the descriptor subsystem.
    pub fn invalid(record: impl Into<String>) -> Self {
        Self {
            record: record.into(),
            valid: false,
            action: None,
        }
    }
}

impl Change for Draft {
    fn is_valid(&self) -> bool {
        self.valid
    }

    fn action(&self) -> Option<Action> {
        self.action
    }

    fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }
}

/// Raw record values stand in for an unvalidated change with no field edits.
impl From<&str> for Draft {
    fn from(record: &str) -> Self {
        Draft::valid(record)
    }
}

/// Values the stub store produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Val {
    /// A persisted record.
    Rec(String),
    /// A bulk-operation row count.
    Count(i64),
}

/// In-memory store with scripted outcomes and a call log.
///
/// Every persist/bulk/transaction call appends one line to `calls`, so tests
/// can assert exactly which store interactions happened and in which order.
pub struct MemStore {
    pub calls: Vec<String>,
    /// Records whose persist calls fail.
    reject: Vec<String>,
    /// Row count reported by `delete_all`.
    deleted: i64,
    /// Row count reported by `update_all`.
    updated: i64,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            reject: Vec::new(),
            deleted: 0,
            updated: 0,
        }
    }

    /// Fail persist calls for `record`.
    pub fn rejecting(mut self, record: impl Into<String>) -> Self {
        self.reject.push(record.into());
        self
    }

    /// Script the row count `delete_all` reports.
    pub fn with_deleted(mut self, count: i64) -> Self {
        self.deleted = count;
        self
    }

    /// Script the row count `update_all` reports.
    pub fn with_updated(mut self, count: i64) -> Self {
        self.updated = count;
        self
    }

    /// Whether a transaction was opened and committed.
    pub fn committed(&self) -> bool {
        self.calls.iter().any(|call| call == "commit")
    }

    /// Whether a transaction was opened and rolled back.
    pub fn rolled_back(&self) -> bool {
        self.calls.iter().any(|call| call == "rollback")
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemStore {
    type Change = Draft;
    type Query = String;
    type Update = String;
    type Row = String;
    type Opts = ();
    type Value = Val;
    type Error = String;

    fn persist(&mut self, action: Action, change: &Draft, _opts: &()) -> Result<Val, String> {
        self.calls.push(format!("persist {action} {}", change.record));
        if self.reject.contains(&change.record) {
            Err(format!("rejected {}", change.record))
        } else {
            Ok(Val::Rec(format!("{}-record", change.record)))
        }
    }

    fn insert_all(&mut self, target: &str, rows: &[String], _opts: &()) -> Val {
        self.calls.push(format!("insert_all {target} {}", rows.len()));
        Val::Count(rows.len() as i64)
    }

    fn update_all(&mut self, query: &String, _update: &String, _opts: &()) -> Val {
        self.calls.push(format!("update_all {query}"));
        Val::Count(self.updated)
    }

    fn delete_all(&mut self, query: &String, _opts: &()) -> Val {
        self.calls.push(format!("delete_all {query}"));
        Val::Count(self.deleted)
    }

    fn transaction<T, E>(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<T, E> {
        self.calls.push("begin".to_string());
        let result = body(self);
        self.calls.push(if result.is_ok() {
            "commit".to_string()
        } else {
            "rollback".to_string()
        });
        result
    }
}
