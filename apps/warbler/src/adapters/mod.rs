//! Adapters for external dependencies.

pub mod follows_sea;
pub mod messages_sea;
pub mod users_sea;
