//! Domain-level error type used by the selection state machine.
//!
//! This error type is HTTP-agnostic. Controller methods return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Rule violations raised by the selection state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Text did not name one of rock, paper, scissors
    InvalidChoice,
    /// A player name matched more than one roster entry
    AmbiguousPlayerName,
    /// Submit attempted while the eligibility invariant does not hold
    NotEligible,
    /// Submit attempted while another submit is outstanding
    SubmitInFlight,
    /// Selection changed while a submit is outstanding
    Busy,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Player,
    Game,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation or state machine rule violation
    Validation(ValidationKind, String),
    /// Missing entity in domain terms
    NotFound(NotFoundKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    /// Validation kind, when this is a validation error.
    pub fn validation_kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            DomainError::NotFound(..) => None,
        }
    }
}
