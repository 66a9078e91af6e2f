//! Fluent CASE WHEN builder.
//!
//! Every append is checked against the [`Cursor`], the kind of the last
//! item added. Legal transitions:
//!
//! ```text
//!   None ──when──▶ When ──then──▶ Then ──when──▶ When
//!                                  │
//!                                  └──otherwise──▶ Else (terminal)
//! ```
//!
//! Anything else fails at the call site. The WHEN/THEN balance is only
//! checked when rendering, because a WHEN waiting for its THEN is legal
//! in the middle of a chain.

use crate::ast::{Condition, Operator, Output, Subject, Value, WhenClause};
use crate::error::{CaseError, CaseResult};

/// Kind of the last item appended to a [`CaseBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    None,
    When,
    Then,
    Else,
}

/// Builder for CASE expressions.
///
/// Methods take `self` and hand it back on success, so a failed call
/// leaves nothing half-applied:
///
/// ```
/// use sqlcase::CaseBuilder;
///
/// let case = CaseBuilder::new()
///     .when("payment_status", 1)?
///     .then("Paid")?
///     .otherwise("Due")?;
///
/// assert_eq!(case.to_sql()?.sql, "case when `payment_status` = ? then ? else ? end");
/// # Ok::<(), sqlcase::CaseError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseBuilder {
    pub(crate) subject: Option<Subject>,
    pub(crate) clauses: Vec<WhenClause>,
    pub(crate) else_result: Option<Output>,
    pub(crate) cursor: Cursor,
}

impl CaseBuilder {
    /// Start a searched CASE (`case when <predicate> ...`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a simple CASE over a column (`` case `column` when ? ... ``).
    pub fn case(column: impl Into<String>) -> Self {
        Self {
            subject: Some(Subject::Column(column.into())),
            ..Self::default()
        }
    }

    /// Start a simple CASE over a raw expression.
    pub fn case_raw(expression: impl Into<String>) -> Self {
        Self {
            subject: Some(Subject::Raw(expression.into())),
            ..Self::default()
        }
    }

    /// Add `` when `column` = ? ``.
    pub fn when(self, column: impl Into<String>, value: impl Into<Value>) -> CaseResult<Self> {
        self.when_op(column, "=", value)
    }

    /// Add `` when `column` <op> ? ``.
    pub fn when_op(
        self,
        column: impl Into<String>,
        op: &str,
        value: impl Into<Value>,
    ) -> CaseResult<Self> {
        self.ensure_when_allowed()?;

        let column = column.into();
        if column.trim().is_empty() {
            return Err(CaseError::MissingSubject);
        }
        let op: Operator = op.parse()?;

        self.push_condition(Condition::Compare {
            column,
            op,
            value: value.into(),
        })
    }

    /// Add `when ?`, compared against the subject given to [`CaseBuilder::case`].
    pub fn when_value(self, value: impl Into<Value>) -> CaseResult<Self> {
        self.ensure_when_allowed()?;
        if self.subject.is_none() {
            return Err(CaseError::MissingSubject);
        }
        self.push_condition(Condition::Match {
            value: value.into(),
        })
    }

    /// Add a WHEN whose predicate is inserted verbatim.
    pub fn when_raw(self, expression: impl Into<String>) -> CaseResult<Self> {
        self.ensure_when_allowed()?;
        self.push_condition(Condition::Raw(expression.into()))
    }

    /// Complete the pending WHEN with a bound result.
    pub fn then(self, value: impl Into<Value>) -> CaseResult<Self> {
        self.push_result(Output::Bound(value.into()))
    }

    /// Complete the pending WHEN with a verbatim result.
    pub fn then_raw(self, expression: impl Into<String>) -> CaseResult<Self> {
        self.push_result(Output::Raw(expression.into()))
    }

    /// Set the ELSE to a bound value.
    pub fn otherwise(self, value: impl Into<Value>) -> CaseResult<Self> {
        self.push_else(Output::Bound(value.into()))
    }

    /// Set the ELSE to a verbatim expression.
    pub fn otherwise_raw(self, expression: impl Into<String>) -> CaseResult<Self> {
        self.push_else(Output::Raw(expression.into()))
    }

    fn ensure_when_allowed(&self) -> CaseResult<()> {
        match self.cursor {
            Cursor::None | Cursor::Then => Ok(()),
            Cursor::When | Cursor::Else => Err(CaseError::WhenMisplaced),
        }
    }

    fn push_condition(mut self, condition: Condition) -> CaseResult<Self> {
        self.clauses.push(WhenClause::new(condition));
        self.cursor = Cursor::When;
        Ok(self)
    }

    fn push_result(mut self, output: Output) -> CaseResult<Self> {
        if self.cursor != Cursor::When {
            return Err(CaseError::ThenBeforeWhen);
        }
        match self.clauses.last_mut() {
            Some(clause) if !clause.is_complete() => clause.result = Some(output),
            _ => return Err(CaseError::ThenBeforeWhen),
        }
        self.cursor = Cursor::Then;
        Ok(self)
    }

    fn push_else(mut self, output: Output) -> CaseResult<Self> {
        if self.else_result.is_some() {
            return Err(CaseError::DuplicateElse);
        }
        if matches!(self.cursor, Cursor::None | Cursor::When) {
            return Err(CaseError::ElseMisplaced);
        }
        self.else_result = Some(output);
        self.cursor = Cursor::Else;
        Ok(self)
    }

    pub fn subject(&self) -> Option<&Subject> {
        self.subject.as_ref()
    }

    pub fn clauses(&self) -> &[WhenClause] {
        &self.clauses
    }

    pub fn else_result(&self) -> Option<&Output> {
        self.else_result.as_ref()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Number of WHEN conditions appended so far.
    pub fn when_count(&self) -> usize {
        self.clauses.len()
    }

    /// Number of THEN results appended so far.
    pub fn then_count(&self) -> usize {
        self.clauses.iter().filter(|c| c.is_complete()).count()
    }

    pub fn has_else(&self) -> bool {
        self.else_result.is_some()
    }

    /// Bound values in placeholder order, without checking that the chain
    /// is complete. [`CaseBuilder::to_sql`] returns the same list once the
    /// clauses balance.
    pub fn bindings(&self) -> Vec<Value> {
        let mut bindings = Vec::new();
        for clause in &self.clauses {
            bindings.extend(clause.condition.binding().cloned());
            if let Some(result) = &clause.result {
                bindings.extend(result.binding().cloned());
            }
        }
        if let Some(otherwise) = &self.else_result {
            bindings.extend(otherwise.binding().cloned());
        }
        bindings
    }

    /// Render-time structure check.
    pub(crate) fn validate(&self) -> CaseResult<()> {
        if self.clauses.is_empty() {
            return Err(CaseError::NoConditions);
        }
        if self.when_count() != self.then_count() {
            return Err(CaseError::UnbalancedClauses);
        }
        Ok(())
    }
}
