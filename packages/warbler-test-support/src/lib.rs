//! Shared helpers for warbler tests: log bootstrap and unique fixture data.

pub mod logging;
pub mod unique_helpers;
