#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod errors;
pub mod infra;
pub mod logging;
pub mod repos;
pub mod services;

// Re-exports for public API
pub use adapters::users_sea::UserCreate;
pub use auth::password::{BcryptHasher, PasswordHasher};
pub use config::db::{db_url, DbProfile};
pub use config::directory::{DirectoryConfig, DuplicateFollowPolicy};
pub use db::{with_session, PendingUser, Session};
pub use error::AppError;
pub use errors::domain::{DomainError, IntegrityKind};
pub use infra::db::{bootstrap_db, connect_db};
pub use repos::messages::Message;
pub use repos::users::User;
pub use services::UserDirectory;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    warbler_test_support::logging::init();
}
