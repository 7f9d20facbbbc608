//! ULID-backed fixture values so tests sharing a database never collide.

use ulid::Ulid;

/// `{prefix}_{ulid}` in lower case, usable as a username.
///
/// ```
/// use warbler_test_support::unique_helpers::unique_username;
///
/// let a = unique_username("user");
/// assert_ne!(a, unique_username("user"));
/// assert!(a.starts_with("user_"));
/// ```
pub fn unique_username(prefix: &str) -> String {
    format!("{prefix}_{}", Ulid::new().to_string().to_lowercase())
}

/// `{prefix}-{ulid}@example.test`
///
/// ```
/// use warbler_test_support::unique_helpers::unique_email;
///
/// let email = unique_email("test");
/// assert!(email.starts_with("test-"));
/// assert!(email.ends_with("@example.test"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.test", Ulid::new())
}
