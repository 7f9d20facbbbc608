use thiserror::Error;

use crate::errors::domain::DomainError;

/// Top-level error for bootstrapping: configuration, connections and migrations.
///
/// Directory operations return [`DomainError`]; it converts into `AppError`
/// so binaries and test harnesses can use one error type end to end.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Migration error: {detail}")]
    Migration { detail: String },
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AppError {
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn migration(detail: impl Into<String>) -> Self {
        Self::Migration {
            detail: detail.into(),
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::db(e.to_string())
    }
}
