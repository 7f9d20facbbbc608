use tracing::warn;

use crate::logging::pii::redact_username;

/// Log a security-relevant login failure event.
pub fn login_failed(reason: &str, username: &str) {
    warn!(
        event = "SECURITY_LOGIN_FAILED",
        username = %redact_username(username),
        reason,
        "Authentication failure"
    );
}
