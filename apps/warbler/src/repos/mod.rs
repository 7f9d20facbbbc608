//! Repository functions for the domain layer.

pub mod follows;
pub mod messages;
pub mod users;
