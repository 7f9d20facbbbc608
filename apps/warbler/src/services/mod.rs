//! Directory services: signup, authentication, follows and messages.

pub mod directory;
pub mod follows;
pub mod messages;

pub use directory::UserDirectory;
