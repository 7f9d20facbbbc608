//! Domain-level error type used across services, repos and adapters.
//!
//! This error type is DB-agnostic. Adapters return `sea_orm::DbErr`, which
//! `crate::infra::db_errors::map_db_err` translates into a `DomainError`.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    Hashing,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    User,
    Message,
    Other(String),
}

/// Which storage rule a write broke.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IntegrityKind {
    UniqueUsername,
    UniqueEmail,
    DuplicateFollow,
    /// Required column left empty; carries the column name when known.
    NotNull(String),
    Check,
    ForeignKey,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation failure detected before touching storage
    Validation(String),
    /// Uniqueness, not-null, check or foreign key violation raised by storage
    Integrity(IntegrityKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(d) => write!(f, "validation error: {d}"),
            DomainError::Integrity(kind, d) => write!(f, "integrity violation {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }
    pub fn integrity(kind: IntegrityKind, detail: impl Into<String>) -> Self {
        Self::Integrity(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, DomainError::Integrity(..))
    }

    pub fn integrity_kind(&self) -> Option<&IntegrityKind> {
        match self {
            DomainError::Integrity(kind, _) => Some(kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrity_helpers() {
        let err = DomainError::integrity(IntegrityKind::UniqueEmail, "email taken");
        assert!(err.is_integrity_violation());
        assert_eq!(err.integrity_kind(), Some(&IntegrityKind::UniqueEmail));

        let nf = DomainError::not_found(NotFoundKind::User, "no user");
        assert!(!nf.is_integrity_violation());
        assert_eq!(nf.integrity_kind(), None);
    }

    #[test]
    fn display_includes_kind_and_detail() {
        let err = DomainError::integrity(
            IntegrityKind::NotNull("username".into()),
            "Missing required field: username",
        );
        let rendered = err.to_string();
        assert!(rendered.starts_with("integrity violation"));
        assert!(rendered.contains("username"));

        assert_eq!(
            DomainError::validation("empty text").to_string(),
            "validation error: empty text"
        );
    }
}
