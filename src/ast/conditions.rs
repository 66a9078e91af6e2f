use crate::ast::{Operator, Value};
use serde::{Deserialize, Serialize};

/// A WHEN predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// `` `column` op ? ``
    Compare {
        column: String,
        op: Operator,
        value: Value,
    },
    /// Compared against the CASE subject: `case <subject> when ?`.
    Match { value: Value },
    /// Inserted verbatim, never bound.
    Raw(String),
}

impl Condition {
    /// The bound value, if this condition has one.
    pub fn binding(&self) -> Option<&Value> {
        match self {
            Condition::Compare { value, .. } | Condition::Match { value } => Some(value),
            Condition::Raw(_) => None,
        }
    }
}

/// Payload of a THEN or of the ELSE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    Bound(Value),
    Raw(String),
}

impl Output {
    pub fn binding(&self) -> Option<&Value> {
        match self {
            Output::Bound(value) => Some(value),
            Output::Raw(_) => None,
        }
    }
}

/// Operand of a simple CASE (`case <subject> when ...`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subject {
    /// Quoted as an identifier.
    Column(String),
    Raw(String),
}

/// One WHEN with the THEN that completes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhenClause {
    pub condition: Condition,
    /// `None` while the chain is waiting for its THEN.
    pub result: Option<Output>,
}

impl WhenClause {
    pub fn new(condition: Condition) -> Self {
        Self {
            condition,
            result: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }
}
