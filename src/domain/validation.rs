//! Declarative field validation.
//!
//! Each field owns an ordered list of rules. Rules run in order and the
//! first failing rule's message is the field's error.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A single predicate with the message reported when it fails.
#[derive(Clone, Copy)]
pub struct Rule {
    predicate: fn(&str) -> bool,
    message: &'static str,
}

impl Rule {
    #[must_use]
    pub const fn new(predicate: fn(&str) -> bool, message: &'static str) -> Self {
        Self { predicate, message }
    }

    /// Returns the failure message if `value` does not satisfy the rule.
    #[must_use]
    pub fn check(&self, value: &str) -> Option<&'static str> {
        if (self.predicate)(value) {
            None
        } else {
            Some(self.message)
        }
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.message
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Ordered rule chain for one field.
#[derive(Debug, Clone, Default)]
pub struct FieldRules {
    rules: Vec<Rule>,
}

impl FieldRules {
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule to the end of the chain.
    #[must_use]
    pub fn rule(mut self, predicate: fn(&str) -> bool, message: &'static str) -> Self {
        self.rules.push(Rule::new(predicate, message));
        self
    }

    /// Runs the chain, stopping at the first failure.
    #[must_use]
    pub fn validate(&self, value: &str) -> Option<&'static str> {
        self.rules.iter().find_map(|rule| rule.check(value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
        )
        .expect("Invalid regex")
    })
}

/// Returns true if `value` has the shape of an email address.
#[must_use]
pub fn is_email(value: &str) -> bool {
    email_regex().is_match(value)
}

fn is_present(value: &str) -> bool {
    !value.is_empty()
}

fn has_min_password_length(value: &str) -> bool {
    value.chars().count() >= MIN_PASSWORD_LENGTH
}

fn has_letter(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_alphabetic())
}

fn has_digit(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_digit())
}

/// Rules for the login email field.
#[must_use]
pub fn email_rules() -> FieldRules {
    FieldRules::new()
        .rule(is_present, "Email is required")
        .rule(is_email, "Please enter a valid email address")
}

/// Rules for the login password field.
#[must_use]
pub fn password_rules() -> FieldRules {
    FieldRules::new()
        .rule(is_present, "Password is required")
        .rule(
            has_min_password_length,
            "Password must be at least 8 characters",
        )
        .rule(has_letter, "Password must contain at least one letter")
        .rule(has_digit, "Password must contain at least one number")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("", Some("Email is required") ; "empty")]
    #[test_case("not-an-email", Some("Please enter a valid email address") ; "no at sign")]
    #[test_case("demo@", Some("Please enter a valid email address") ; "missing domain")]
    #[test_case("demo@example", Some("Please enter a valid email address") ; "missing tld")]
    #[test_case("demo@example.com", None ; "valid")]
    #[test_case("DEMO@Example.COM", None ; "mixed case")]
    fn test_email_rules(value: &str, expected: Option<&str>) {
        assert_eq!(email_rules().validate(value), expected);
    }

    #[test_case("", Some("Password is required") ; "empty")]
    #[test_case("short1", Some("Password must be at least 8 characters") ; "too short")]
    #[test_case("12345678", Some("Password must contain at least one letter") ; "digits only")]
    #[test_case("Password", Some("Password must contain at least one number") ; "letters only")]
    #[test_case("Password1", None ; "valid")]
    fn test_password_rules(value: &str, expected: Option<&str>) {
        assert_eq!(password_rules().validate(value), expected);
    }

    #[test]
    fn test_first_failure_wins() {
        // "abc" fails length and digit rules; only the length message is reported.
        assert_eq!(
            password_rules().validate("abc"),
            Some("Password must be at least 8 characters")
        );
    }

    #[test]
    fn test_custom_chain_order() {
        let rules = FieldRules::new()
            .rule(|v| v.len() > 3, "too short")
            .rule(|v| v.starts_with('x'), "must start with x");

        assert_eq!(rules.len(), 2);
        assert_eq!(rules.validate("ab"), Some("too short"));
        assert_eq!(rules.validate("abcd"), Some("must start with x"));
        assert_eq!(rules.validate("xabc"), None);
        assert!(FieldRules::new().validate("anything").is_none());
    }
}
