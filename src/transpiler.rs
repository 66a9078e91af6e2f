//! SQL rendering for [`CaseBuilder`].
//!
//! One walk over the clause list serves both outputs. In parameterized
//! mode every bound value becomes `?` and is pushed onto the binding list;
//! in literal mode it is written inline. Raw fragments are copied as-is in
//! both modes.

use crate::ast::{Condition, Output, Subject, Value};
use crate::builder::CaseBuilder;
use crate::error::CaseResult;

/// Placeholder token for bound values.
pub const PLACEHOLDER: &str = "?";

/// Parameterized rendering of a CASE expression.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCase {
    pub sql: String,
    /// One entry per placeholder, left to right.
    pub bindings: Vec<Value>,
}

impl CompiledCase {
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.bindings)
    }
}

impl std::fmt::Display for CompiledCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sql)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Parameterized,
    Literal,
}

/// Collects bindings while rendering.
#[derive(Debug)]
struct RenderContext {
    mode: Mode,
    bindings: Vec<Value>,
}

impl RenderContext {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            bindings: Vec::new(),
        }
    }

    /// Placeholder or inline literal for a bound value.
    fn value(&mut self, value: &Value) -> String {
        match self.mode {
            Mode::Parameterized => {
                self.bindings.push(value.clone());
                PLACEHOLDER.to_string()
            }
            Mode::Literal => value.to_string(),
        }
    }

    fn condition(&mut self, condition: &Condition) -> String {
        match condition {
            Condition::Compare { column, op, value } => {
                format!("{} {} {}", quote_identifier(column), op, self.value(value))
            }
            Condition::Match { value } => self.value(value),
            Condition::Raw(expression) => expression.clone(),
        }
    }

    fn output(&mut self, output: &Output) -> String {
        match output {
            Output::Bound(value) => self.value(value),
            Output::Raw(expression) => expression.clone(),
        }
    }

    fn render(&mut self, case: &CaseBuilder) -> CaseResult<String> {
        case.validate()?;

        let mut sql = String::from("case");

        if let Some(subject) = &case.subject {
            sql.push(' ');
            match subject {
                Subject::Column(column) => sql.push_str(&quote_identifier(column)),
                Subject::Raw(expression) => sql.push_str(expression),
            }
        }

        for clause in &case.clauses {
            sql.push_str(" when ");
            sql.push_str(&self.condition(&clause.condition));
            // validate() guarantees every clause is complete
            if let Some(result) = &clause.result {
                sql.push_str(" then ");
                sql.push_str(&self.output(result));
            }
        }

        if let Some(otherwise) = &case.else_result {
            sql.push_str(" else ");
            sql.push_str(&self.output(otherwise));
        }

        sql.push_str(" end");

        tracing::trace!(
            mode = ?self.mode,
            clauses = case.clauses.len(),
            bindings = self.bindings.len(),
            "rendered CASE expression"
        );

        Ok(sql)
    }
}

impl CaseBuilder {
    /// Render with `?` placeholders and the matching binding list.
    pub fn to_sql(&self) -> CaseResult<CompiledCase> {
        let mut ctx = RenderContext::new(Mode::Parameterized);
        let sql = ctx.render(self)?;
        Ok(CompiledCase {
            sql,
            bindings: ctx.bindings,
        })
    }

    /// Render with every value inlined. Meant for logs and debugging, not
    /// for execution.
    pub fn to_raw(&self) -> CaseResult<String> {
        RenderContext::new(Mode::Literal).render(self)
    }
}

/// Quote an identifier with backticks.
/// Dotted names (`orders.status`) are quoted per part; `*` is left alone.
pub fn quote_identifier(name: &str) -> String {
    name.split('.')
        .map(|part| {
            let part = part.trim();
            if part == "*" {
                part.to_string()
            } else {
                format!("`{}`", part.replace('`', "``"))
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}
