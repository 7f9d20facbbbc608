//! Error handling for the Warbler model layer.

pub mod domain;

pub use domain::{DomainError, InfraErrorKind, IntegrityKind, NotFoundKind};
