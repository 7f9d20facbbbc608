use std::env;

use crate::error::AppError;

/// In-memory SQLite URL used when no test database is configured.
pub const SQLITE_MEMORY_URL: &str = "sqlite::memory:";

/// Database profile enum for different environments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbProfile {
    /// Production database profile
    Prod,
    /// Test database profile - enforces safety rules
    Test,
}

/// Storage engine behind a connection string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    SqliteMemory,
}

impl DbKind {
    pub fn from_url(url: &str) -> Result<Self, AppError> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(DbKind::Postgres)
        } else if url.starts_with("sqlite:") {
            if url.contains(":memory:") || url.contains("mode=memory") {
                Ok(DbKind::SqliteMemory)
            } else {
                Ok(DbKind::SqliteFile)
            }
        } else {
            Err(AppError::config(format!(
                "Unsupported database URL scheme (expected postgres:// or sqlite:): '{}'",
                scheme_of(url)
            )))
        }
    }
}

/// Resolve the connection string for a profile from the environment.
///
/// - `Prod` reads `DATABASE_URL` (required).
/// - `Test` reads `TEST_DATABASE_URL`, falling back to in-memory SQLite. A
///   configured test database must be in-memory or have a name ending in
///   `_test` / `-test`, so a test run can never point at production data.
pub fn db_url(profile: DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Prod => {
            let url = must_var("DATABASE_URL")?;
            DbKind::from_url(&url)?;
            Ok(url)
        }
        DbProfile::Test => {
            let url = env::var("TEST_DATABASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| SQLITE_MEMORY_URL.to_string());
            ensure_test_safe(&url)?;
            Ok(url)
        }
    }
}

fn ensure_test_safe(url: &str) -> Result<(), AppError> {
    let kind = DbKind::from_url(url)?;
    if kind == DbKind::SqliteMemory {
        return Ok(());
    }

    let name = database_name(url);
    if name.ends_with("_test") || name.ends_with("-test") {
        Ok(())
    } else {
        Err(AppError::config(format!(
            "Test profile requires database name to end with '_test' or '-test', but got: '{name}'"
        )))
    }
}

/// Last path segment without query string or file extension.
fn database_name(url: &str) -> &str {
    let without_query = url.split('?').next().unwrap_or(url);
    let last = without_query.rsplit('/').next().unwrap_or(without_query);
    let last = last.strip_prefix("sqlite:").unwrap_or(last);
    match last.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => last,
    }
}

fn scheme_of(url: &str) -> &str {
    url.split(':').next().unwrap_or(url)
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
