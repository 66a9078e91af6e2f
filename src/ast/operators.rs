use crate::error::CaseError;
use serde::{Deserialize, Serialize};

/// Comparison operator of a structured WHEN condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Operator {
    #[default]
    Eq,
    Ne,
    /// `<>`, kept apart from `!=` so output matches what the caller wrote.
    NotEq,
    Gt,
    Gte,
    Lt,
    Lte,
    NullSafeEq,
    Like,
    NotLike,
    ILike,
    NotILike,
    Regexp,
    NotRegexp,
}

impl Operator {
    pub fn sql_symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::NotEq => "<>",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::NullSafeEq => "<=>",
            Operator::Like => "like",
            Operator::NotLike => "not like",
            Operator::ILike => "ilike",
            Operator::NotILike => "not ilike",
            Operator::Regexp => "regexp",
            Operator::NotRegexp => "not regexp",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.sql_symbol())
    }
}

impl std::str::FromStr for Operator {
    type Err = CaseError;

    /// Keyword operators are matched case-insensitively and with any run
    /// of whitespace between words (`NOT  LIKE` parses as `not like`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        let op = match normalized.as_str() {
            "=" | "==" => Operator::Eq,
            "!=" => Operator::Ne,
            "<>" => Operator::NotEq,
            ">" => Operator::Gt,
            ">=" => Operator::Gte,
            "<" => Operator::Lt,
            "<=" => Operator::Lte,
            "<=>" => Operator::NullSafeEq,
            "like" => Operator::Like,
            "not like" => Operator::NotLike,
            "ilike" => Operator::ILike,
            "not ilike" => Operator::NotILike,
            "regexp" | "rlike" => Operator::Regexp,
            "not regexp" | "not rlike" => Operator::NotRegexp,
            _ => return Err(CaseError::InvalidOperator(s.to_string())),
        };
        Ok(op)
    }
}
