//! Serialized CASE definitions.
//!
//! A definition is a plain description of the chain, usually written as
//! TOML:
//!
//! ```toml
//! [[when]]
//! column = "payment_status"
//! value = 1
//! then = "Paid"
//!
//! [[when]]
//! raw = "payment_status >= 4"
//! then_raw = "'Due'"
//!
//! [else]
//! value = "Unknown"
//! ```
//!
//! [`CaseDefinition::into_builder`] replays it through the fluent API, so a
//! definition is subject to exactly the same ordering rules.

use serde::{Deserialize, Deserializer, Serialize};

use crate::ast::Value;
use crate::builder::CaseBuilder;
use crate::error::{CaseError, CaseResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseDefinition {
    /// Column for a simple CASE.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_raw: Option<String>,
    #[serde(default, rename = "when")]
    pub whens: Vec<WhenDefinition>,
    #[serde(default, rename = "else", skip_serializing_if = "Option::is_none")]
    pub otherwise: Option<OutputDefinition>,
}

/// One WHEN and its THEN.
///
/// `column` + `value` (+ optional `op`) is a comparison, `value` alone
/// matches the subject, `raw` is a verbatim predicate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WhenDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op: Option<String>,
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub then: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub then_raw: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputDefinition {
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

/// A present field is always `Some`, so an explicit `null` reads as
/// `Some(Value::Null)` instead of collapsing into an absent field.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl CaseDefinition {
    pub fn from_toml_str(input: &str) -> CaseResult<Self> {
        toml::from_str(input).map_err(CaseError::definition)
    }

    pub fn from_json_str(input: &str) -> CaseResult<Self> {
        serde_json::from_str(input).map_err(CaseError::definition)
    }

    /// Replay the definition through [`CaseBuilder`].
    ///
    /// Shape problems (both `then` and `then_raw`, no predicate at all)
    /// are [`CaseError::Definition`]; ordering problems surface as the
    /// builder's own errors.
    pub fn into_builder(self) -> CaseResult<CaseBuilder> {
        let mut case = match (self.subject, self.subject_raw) {
            (Some(_), Some(_)) => {
                return Err(CaseError::definition(
                    "`subject` and `subject_raw` are mutually exclusive",
                ));
            }
            (Some(column), None) => CaseBuilder::case(column),
            (None, Some(expression)) => CaseBuilder::case_raw(expression),
            (None, None) => CaseBuilder::new(),
        };

        let count = self.whens.len();
        for (index, when) in self.whens.into_iter().enumerate() {
            case = when.apply(case, index + 1)?;
        }

        if let Some(otherwise) = self.otherwise {
            case = match (otherwise.value, otherwise.raw) {
                (Some(value), None) => case.otherwise(value)?,
                (None, Some(expression)) => case.otherwise_raw(expression)?,
                _ => {
                    return Err(CaseError::definition(
                        "`else` needs exactly one of `value` or `raw`",
                    ));
                }
            };
        }

        tracing::debug!(
            clauses = count,
            has_else = case.has_else(),
            "built CASE from definition"
        );
        Ok(case)
    }
}

impl WhenDefinition {
    fn apply(self, case: CaseBuilder, position: usize) -> CaseResult<CaseBuilder> {
        let case = match (self.raw, self.column, self.value) {
            (Some(expression), None, None) if self.op.is_none() => case.when_raw(expression)?,
            (Some(_), _, _) => {
                return Err(CaseError::definition(format!(
                    "WHEN #{position}: `raw` cannot be combined with `column`, `op` or `value`"
                )));
            }
            (None, Some(column), Some(value)) => {
                let op = self.op.as_deref().unwrap_or("=");
                case.when_op(column, op, value)?
            }
            (None, None, Some(value)) if self.op.is_none() => case.when_value(value)?,
            (None, None, Some(_)) => {
                return Err(CaseError::definition(format!(
                    "WHEN #{position}: `op` requires a `column`"
                )));
            }
            (None, _, None) => {
                return Err(CaseError::definition(format!(
                    "WHEN #{position}: missing `value` or `raw`"
                )));
            }
        };

        match (self.then, self.then_raw) {
            (Some(value), None) => case.then(value),
            (None, Some(expression)) => case.then_raw(expression),
            (Some(_), Some(_)) => Err(CaseError::definition(format!(
                "WHEN #{position}: `then` and `then_raw` are mutually exclusive"
            ))),
            // Left pending; rendering reports the imbalance.
            (None, None) => Ok(case),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CaseErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_toml_complex() {
        let def = CaseDefinition::from_toml_str(
            r#"
            [[when]]
            column = "payment_status"
            value = 1
            then = "Paid"

            [[when]]
            column = "payment_status"
            op = "<="
            value = 5
            then = "Canceled"

            [else]
            value = "Unknown"
            "#,
        )
        .unwrap();

        let compiled = def.into_builder().unwrap().to_sql().unwrap();
        assert_eq!(
            compiled.sql,
            "case when `payment_status` = ? then ? when `payment_status` <= ? then ? else ? end"
        );
        assert_eq!(compiled.bindings.len(), 5);
    }

    #[test]
    fn test_json_subject() {
        let def = CaseDefinition::from_json_str(
            r#"{
                "subject": "payment_status",
                "when": [
                    { "value": 1, "then": "Paid" },
                    { "raw": "payment_status IS NULL", "then_raw": "NULL" }
                ]
            }"#,
        )
        .unwrap();

        let case = def.into_builder().unwrap();
        assert_eq!(
            case.to_raw().unwrap(),
            r#"case `payment_status` when 1 then "Paid" when payment_status IS NULL then NULL end"#
        );
    }

    #[test]
    fn test_unknown_field() {
        let err = CaseDefinition::from_toml_str("[[when]]\ncolumn = \"a\"\nvalu = 1\n").unwrap_err();
        assert_eq!(err.kind(), CaseErrorKind::Definition);
    }

    #[test]
    fn test_ambiguous_then() {
        let def = CaseDefinition {
            whens: vec![WhenDefinition {
                column: Some("status".into()),
                value: Some(Value::Int(1)),
                then: Some(Value::from("Paid")),
                then_raw: Some("'Paid'".into()),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(def.into_builder().unwrap_err().kind(), CaseErrorKind::Definition);
    }

    #[test]
    fn test_missing_then_is_unbalanced() {
        let def = CaseDefinition {
            whens: vec![WhenDefinition {
                column: Some("status".into()),
                value: Some(Value::Int(1)),
                ..Default::default()
            }],
            ..Default::default()
        };
        let case = def.into_builder().unwrap();
        assert_eq!(case.to_sql().unwrap_err().kind(), CaseErrorKind::UnbalancedClauses);
    }

    #[test]
    fn test_value_without_subject() {
        let def = CaseDefinition::from_toml_str("[[when]]\nvalue = 1\nthen = \"Paid\"\n").unwrap();
        assert_eq!(def.into_builder().unwrap_err().kind(), CaseErrorKind::MissingSubject);
    }

    #[test]
    fn test_else_only() {
        let def = CaseDefinition::from_toml_str("[else]\nvalue = \"Unknown\"\n").unwrap();
        assert_eq!(def.into_builder().unwrap_err().kind(), CaseErrorKind::ElseMisplaced);
    }

    #[test]
    fn test_null_value() {
        let def = CaseDefinition::from_json_str(
            r#"{"when": [{"column": "deleted_at", "value": null, "then": "live"}]}"#,
        )
        .unwrap();
        assert_eq!(def.whens[0].value, Some(Value::Null));

        let compiled = def.into_builder().unwrap().to_sql().unwrap();
        assert_eq!(compiled.sql, "case when `deleted_at` = ? then ? end");
        assert_eq!(compiled.bindings, vec![Value::Null, Value::from("live")]);
    }

    #[test]
    fn test_null_then_and_else() {
        let def = CaseDefinition::from_json_str(
            r#"{
                "when": [{"column": "status", "value": 1, "then": null}],
                "else": {"value": null}
            }"#,
        )
        .unwrap();

        let case = def.into_builder().unwrap();
        assert_eq!(case.then_count(), 1);
        assert_eq!(case.to_raw().unwrap(), "case when `status` = 1 then null else null end");
    }

    #[test]
    fn test_absent_value_stays_none() {
        let def = CaseDefinition::from_json_str(r#"{"when": [{"raw": "a > 1", "then_raw": "1"}]}"#)
            .unwrap();
        assert_eq!(def.whens[0].value, None);
        assert_eq!(def.whens[0].then, None);
    }

    #[test]
    fn test_json_keeps_explicit_null() {
        let def = CaseDefinition {
            whens: vec![WhenDefinition {
                column: Some("deleted_at".into()),
                value: Some(Value::Null),
                then: Some(Value::Null),
                ..Default::default()
            }],
            otherwise: Some(OutputDefinition {
                value: Some(Value::Null),
                raw: None,
            }),
            ..Default::default()
        };

        let json = serde_json::to_string(&def).unwrap();
        assert_eq!(CaseDefinition::from_json_str(&json).unwrap(), def);
    }
}
