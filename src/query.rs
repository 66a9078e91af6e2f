//! Handing a rendered CASE to a host query builder.
//!
//! The host only has to accept a raw SQL fragment together with its
//! bindings. [`RawQuery`] is the bundled host: a select list of raw
//! fragments with one shared binding list.

use crate::ast::Value;
use crate::builder::CaseBuilder;
use crate::error::CaseResult;
use crate::transpiler::quote_identifier;

/// A query object that accepts raw SQL fragments with `?` bindings.
pub trait QueryHost {
    /// Append `sql`, whose placeholders are filled by `bindings` in order.
    fn append_raw(&mut self, sql: &str, bindings: Vec<Value>);
}

/// Minimal select-list host.
///
/// ```
/// use sqlcase::{CaseBuilder, RawQuery};
///
/// let query = CaseBuilder::new()
///     .when("payment_status", 1)?
///     .then("Paid")?
///     .to_query()?;
///
/// assert_eq!(query.sql(), "select case when `payment_status` = ? then ? end");
/// assert_eq!(query.bindings().len(), 2);
/// # Ok::<(), sqlcase::CaseError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawQuery {
    fragments: Vec<String>,
    bindings: Vec<Value>,
}

impl RawQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw select-list entry.
    pub fn select_raw(mut self, sql: impl Into<String>, bindings: Vec<Value>) -> Self {
        self.append_raw(&sql.into(), bindings);
        self
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn bindings(&self) -> &[Value] {
        &self.bindings
    }

    /// `select <fragment>, <fragment>, ...`
    pub fn sql(&self) -> String {
        format!("select {}", self.fragments.join(", "))
    }
}

impl QueryHost for RawQuery {
    fn append_raw(&mut self, sql: &str, bindings: Vec<Value>) {
        self.fragments.push(sql.to_string());
        self.bindings.extend(bindings);
    }
}

impl CaseBuilder {
    /// Render into a fresh [`RawQuery`].
    pub fn to_query(&self) -> CaseResult<RawQuery> {
        self.to_query_with(RawQuery::new())
    }

    /// Render into a caller-supplied host and give it back.
    pub fn to_query_with<H: QueryHost>(&self, mut host: H) -> CaseResult<H> {
        let compiled = self.to_sql()?;
        host.append_raw(&compiled.sql, compiled.bindings);
        Ok(host)
    }

    /// Like [`CaseBuilder::to_query_with`], naming the expression `` as `alias` ``.
    pub fn to_query_as<H: QueryHost>(&self, mut host: H, alias: &str) -> CaseResult<H> {
        let compiled = self.to_sql()?;
        let sql = format!("{} as {}", compiled.sql, quote_identifier(alias));
        host.append_raw(&sql, compiled.bindings);
        Ok(host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CaseError;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(String, Vec<Value>)>,
    }

    impl QueryHost for Recorder {
        fn append_raw(&mut self, sql: &str, bindings: Vec<Value>) {
            self.calls.push((sql.to_string(), bindings));
        }
    }

    fn paid_case() -> CaseBuilder {
        CaseBuilder::new()
            .when("payment_status", 1)
            .and_then(|c| c.then("Paid"))
            .unwrap()
    }

    #[test]
    fn test_to_query_returns_host() {
        let query = paid_case().to_query().unwrap();
        assert_eq!(query.fragments().len(), 1);
        assert_eq!(query.bindings(), &[Value::Int(1), Value::from("Paid")]);
    }

    #[test]
    fn test_to_query_with_existing_host() {
        let query = RawQuery::new().select_raw("`id`", vec![]);
        let query = paid_case().to_query_as(query, "payment").unwrap();

        assert_eq!(
            query.sql(),
            "select `id`, case when `payment_status` = ? then ? end as `payment`"
        );
    }

    #[test]
    fn test_custom_host() {
        let recorder = paid_case().to_query_with(Recorder::default()).unwrap();
        assert_eq!(recorder.calls.len(), 1);
        assert_eq!(recorder.calls[0].1.len(), 2);
    }

    #[test]
    fn test_unbalanced_never_reaches_host() {
        let pending = CaseBuilder::new().when("payment_status", 1).unwrap();
        let err = pending.to_query_with(Recorder::default()).err();
        assert_eq!(err, Some(CaseError::UnbalancedClauses));
    }
}
