use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Centralized registry for PII redaction regex patterns.
///
/// All patterns are vetted literals; each construction site carries its own allow.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// Email pattern: matches standard email addresses
    pub fn email() -> &'static Regex {
        static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
        });
        &EMAIL_REGEX
    }

    /// Modular-crypt password hashes such as `$2b$12$...`
    pub fn password_hash() -> &'static Regex {
        static HASH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\$2[abxy]?\$\d{2}\$[./A-Za-z0-9]{53}").unwrap()
        });
        &HASH_REGEX
    }
}

/// Redacts sensitive information from a string.
///
/// - Emails: keeps first character of local part, replaces rest with ***, keeps full domain
/// - bcrypt hashes: replaced with [REDACTED_HASH]
pub fn redact(input: &str) -> String {
    let hashes_redacted = PiiRegexRegistry::password_hash().replace_all(input, "[REDACTED_HASH]");

    PiiRegexRegistry::email()
        .replace_all(&hashes_redacted, |caps: &regex::Captures| {
            let full_match = &caps[0];
            match full_match.find('@') {
                Some(0) | None => full_match.to_string(),
                Some(at_pos) => {
                    let (local_part, domain) = full_match.split_at(at_pos);
                    let first_char: String = local_part.chars().take(1).collect();
                    format!("{first_char}***{domain}")
                }
            }
        })
        .into_owned()
}

/// Redacts a username for security logs: first two characters survive.
pub fn redact_username(username: &str) -> String {
    let visible: String = username.chars().take(2).collect();
    if username.chars().count() <= 2 {
        "*".repeat(username.chars().count())
    } else {
        format!("{visible}***")
    }
}

/// A wrapper that automatically redacts sensitive strings when displayed.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}
