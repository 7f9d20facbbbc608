//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos and the session convert it here
//! into a `DomainError`. Constraint failures become integrity violations,
//! recognised from both PostgreSQL and SQLite error text.

use tracing::{error, warn};

use crate::errors::domain::{DomainError, InfraErrorKind, IntegrityKind, NotFoundKind};
use crate::logging::pii::Redacted;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(&format!("SQLSTATE({code})")) || msg.contains(&format!("code: {code}"))
}

/// Extract `table.column` from SQLite "<KIND> constraint failed: table.column" messages.
/// Composite keys report several columns; the first one is returned.
fn extract_sqlite_table_column<'a>(error_msg: &'a str, marker: &str) -> Option<&'a str> {
    let start = error_msg.find(marker)? + marker.len();
    error_msg[start..]
        .split_whitespace()
        .next()
        .map(|s| s.trim_end_matches([',', '"', ')']))
}

/// Extract the column name from PostgreSQL `null value in column "x" ...` messages.
fn extract_postgres_null_column(error_msg: &str) -> Option<&str> {
    let marker = "null value in column \"";
    let start = error_msg.find(marker)? + marker.len();
    let rest = &error_msg[start..];
    rest.find('"').map(|end| &rest[..end])
}

/// Map SQLite table.column format to a unique-violation kind.
fn map_sqlite_unique(table_column: &str) -> Option<(IntegrityKind, &'static str)> {
    match table_column {
        "users.username" => Some((IntegrityKind::UniqueUsername, "Username already taken")),
        "users.email" => Some((IntegrityKind::UniqueEmail, "Email already registered")),
        "follows.follower_id" | "follows.followed_id" => {
            Some((IntegrityKind::DuplicateFollow, "Already following this user"))
        }
        _ => None,
    }
}

/// Map PostgreSQL constraint names to a unique-violation kind.
fn map_postgres_unique(error_msg: &str) -> Option<(IntegrityKind, &'static str)> {
    if error_msg.contains("users_username_key") {
        return Some((IntegrityKind::UniqueUsername, "Username already taken"));
    }
    if error_msg.contains("users_email_key") {
        return Some((IntegrityKind::UniqueEmail, "Email already registered"));
    }
    if error_msg.contains("follows_pkey") {
        return Some((IntegrityKind::DuplicateFollow, "Already following this user"));
    }
    None
}

/// Classify constraint failures; `None` when the error is not an integrity violation.
fn classify_integrity(error_msg: &str) -> Option<DomainError> {
    if mentions_sqlstate(error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        if let Some(table_column) =
            extract_sqlite_table_column(error_msg, "UNIQUE constraint failed: ")
        {
            if let Some((kind, detail)) = map_sqlite_unique(table_column) {
                return Some(DomainError::integrity(kind, detail));
            }
        }
        if let Some((kind, detail)) = map_postgres_unique(error_msg) {
            return Some(DomainError::integrity(kind, detail));
        }
        return Some(DomainError::integrity(
            IntegrityKind::Other("Unique".into()),
            "Unique constraint violation",
        ));
    }

    if mentions_sqlstate(error_msg, "23502")
        || error_msg.contains("violates not-null constraint")
        || error_msg.contains("NOT NULL constraint failed")
    {
        let column = extract_sqlite_table_column(error_msg, "NOT NULL constraint failed: ")
            .map(|tc| tc.rsplit('.').next().unwrap_or(tc))
            .or_else(|| extract_postgres_null_column(error_msg))
            .unwrap_or("unknown");
        return Some(DomainError::integrity(
            IntegrityKind::NotNull(column.to_string()),
            format!("Missing required field: {column}"),
        ));
    }

    if mentions_sqlstate(error_msg, "23514")
        || error_msg.contains("violates check constraint")
        || error_msg.contains("CHECK constraint failed")
    {
        return Some(DomainError::integrity(
            IntegrityKind::Check,
            "Check constraint violation",
        ));
    }

    if mentions_sqlstate(error_msg, "23503")
        || error_msg.contains("violates foreign key constraint")
        || error_msg.contains("FOREIGN KEY constraint failed")
    {
        return Some(DomainError::integrity(
            IntegrityKind::ForeignKey,
            "Referenced user does not exist",
        ));
    }

    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                "Record not found",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if let Some(violation) = classify_integrity(&error_msg) {
        warn!(
            raw_error = %Redacted(&error_msg),
            kind = ?violation.integrity_kind(),
            "Integrity violation"
        );
        return violation;
    }

    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        warn!(raw_error = %Redacted(&error_msg), "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}
