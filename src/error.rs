//! Error types for CASE construction and rendering.

use thiserror::Error;

/// The error type for every CASE builder operation.
///
/// Construction errors are raised by the fluent methods the moment an
/// illegal call order is seen. `UnbalancedClauses` and `NoConditions` are
/// only checked when rendering, since a pending WHEN is legal mid-chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaseError {
    #[error("ELSE statement is already present. The CASE statement can have only one ELSE.")]
    DuplicateElse,

    #[error("The CASE statement must have a matching number of WHEN/THEN conditions.")]
    UnbalancedClauses,

    #[error(
        "The CASE statement subject must be present when operator and column are not present."
    )]
    MissingSubject,

    #[error("THEN cannot be before WHEN on a CASE statement.")]
    ThenBeforeWhen,

    #[error("ELSE can only be set after a WHEN/THEN in a CASE statement.")]
    ElseMisplaced,

    #[error("Wrong WHEN position.")]
    WhenMisplaced,

    #[error("The CASE statement must have at least one WHEN/THEN condition.")]
    NoConditions,

    /// Comparison operator not in the supported set.
    #[error("Invalid operator: '{0}'")]
    InvalidOperator(String),

    /// A serialized CASE definition could not be read.
    #[error("Invalid CASE definition: {0}")]
    Definition(String),
}

/// Discriminant of [`CaseError`], for matching without payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseErrorKind {
    DuplicateElse,
    UnbalancedClauses,
    MissingSubject,
    ThenBeforeWhen,
    ElseMisplaced,
    WhenMisplaced,
    NoConditions,
    InvalidOperator,
    Definition,
}

impl CaseError {
    pub fn kind(&self) -> CaseErrorKind {
        match self {
            CaseError::DuplicateElse => CaseErrorKind::DuplicateElse,
            CaseError::UnbalancedClauses => CaseErrorKind::UnbalancedClauses,
            CaseError::MissingSubject => CaseErrorKind::MissingSubject,
            CaseError::ThenBeforeWhen => CaseErrorKind::ThenBeforeWhen,
            CaseError::ElseMisplaced => CaseErrorKind::ElseMisplaced,
            CaseError::WhenMisplaced => CaseErrorKind::WhenMisplaced,
            CaseError::NoConditions => CaseErrorKind::NoConditions,
            CaseError::InvalidOperator(_) => CaseErrorKind::InvalidOperator,
            CaseError::Definition(_) => CaseErrorKind::Definition,
        }
    }

    /// Create a definition error from any displayable cause.
    pub fn definition(message: impl std::fmt::Display) -> Self {
        Self::Definition(message.to_string())
    }
}

/// Result type alias for CASE operations.
pub type CaseResult<T> = Result<T, CaseError>;
