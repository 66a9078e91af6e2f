//! # sqlcase — SQL CASE WHEN builder
//!
//! Build `case when ... then ... else ... end` step by step and render it
//! twice from the same clause list: once with `?` placeholders and a
//! binding list for execution, once with literals inlined for logs.
//!
//! ## Quick Example
//!
//! ```
//! use sqlcase::prelude::*;
//!
//! let case = sqlcase::when("payment_status", 1)?
//!     .then("Paid")?
//!     .when_op("payment_status", "<=", 5)?
//!     .then("Canceled")?
//!     .otherwise("Unknown")?;
//!
//! let compiled = case.to_sql()?;
//! assert_eq!(
//!     compiled.sql,
//!     "case when `payment_status` = ? then ? when `payment_status` <= ? then ? else ? end"
//! );
//! assert_eq!(compiled.bindings.len(), 5);
//!
//! assert_eq!(
//!     case.to_raw()?,
//!     r#"case when `payment_status` = 1 then "Paid" when `payment_status` <= 5 then "Canceled" else "Unknown" end"#
//! );
//! # Ok::<(), CaseError>(())
//! ```
//!
//! ## Call order
//!
//! | Call | Allowed after |
//! |------|---------------|
//! | `when*` | start, `then*` |
//! | `then*` | `when*` |
//! | `otherwise*` | `then*`, once |
//!
//! Anything else is a [`CaseError`] at the call site. A WHEN left without
//! its THEN is reported when rendering.

pub mod ast;
pub mod builder;
pub mod definition;
pub mod error;
pub mod query;
pub mod transpiler;

pub use ast::{Condition, Operator, Output, Subject, Value, WhenClause};
pub use builder::{CaseBuilder, Cursor};
pub use definition::CaseDefinition;
pub use error::{CaseError, CaseErrorKind, CaseResult};
pub use query::{QueryHost, RawQuery};
pub use transpiler::CompiledCase;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::builder::CaseBuilder;
    pub use crate::error::*;
    pub use crate::query::{QueryHost, RawQuery};
    pub use crate::transpiler::CompiledCase;
}

/// Start a searched CASE with `` when `column` = ? ``.
pub fn when(column: impl Into<String>, value: impl Into<Value>) -> CaseResult<CaseBuilder> {
    CaseBuilder::new().when(column, value)
}

/// Start a searched CASE with `` when `column` <op> ? ``.
pub fn when_op(
    column: impl Into<String>,
    op: &str,
    value: impl Into<Value>,
) -> CaseResult<CaseBuilder> {
    CaseBuilder::new().when_op(column, op, value)
}

/// Start a searched CASE with a verbatim predicate.
pub fn when_raw(expression: impl Into<String>) -> CaseResult<CaseBuilder> {
    CaseBuilder::new().when_raw(expression)
}

/// Start a simple CASE over `column`.
///
/// ```
/// let sql = sqlcase::case("status")
///     .when_value("a")?
///     .then(1)?
///     .to_sql()?
///     .sql;
/// assert_eq!(sql, "case `status` when ? then ? end");
/// # Ok::<(), sqlcase::CaseError>(())
/// ```
pub fn case(column: impl Into<String>) -> CaseBuilder {
    CaseBuilder::case(column)
}

/// Start a simple CASE over a verbatim expression.
pub fn case_raw(expression: impl Into<String>) -> CaseBuilder {
    CaseBuilder::case_raw(expression)
}
