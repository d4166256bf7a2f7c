//! Declarative per-field form validation.
//!
//! Each field carries an ordered list of rules, one message per rule. On
//! submit every field is evaluated (no short-circuit across fields) and the
//! first failing rule per field provides its error message.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

// Registration field names, matching the QR payload keys.
pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const AGE: &str = "age";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";
pub const ADDRESS: &str = "address";
pub const PASSWORD: &str = "password";

/// Fields a QR payload is allowed to hydrate.
pub const REGISTRATION_FIELDS: [&str; 6] = [FIRST_NAME, LAST_NAME, AGE, EMAIL, PHONE, ADDRESS];

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("valid email pattern")
});

// Optional country prefix, optional parentheses around the exchange, and
// dash/space/dot separators: "+1 (555) 000-0000", "555-123-4567", "5551234567".
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9]{0,3}[-\s.]?\(?[0-9]{3}\)?[-\s.]?[0-9]{3}[-\s.]?[0-9]{4,6}$")
        .expect("valid phone pattern")
});

// ============================================================================
// Rules
// ============================================================================

/// Constraint kinds a rule can check.
#[derive(Clone, Debug)]
pub enum Constraint {
    Required,
    Pattern(&'static Regex),
    /// Inclusive numeric lower bound.
    Min(f64),
    /// Inclusive numeric upper bound.
    Max(f64),
    MinLength(usize),
}

/// A single constraint attached to a field, with its error message.
#[derive(Clone, Debug)]
pub struct Rule {
    pub constraint: Constraint,
    pub message: &'static str,
}

impl Rule {
    pub fn required(message: &'static str) -> Self {
        Self {
            constraint: Constraint::Required,
            message,
        }
    }

    pub fn pattern(re: &'static Regex, message: &'static str) -> Self {
        Self {
            constraint: Constraint::Pattern(re),
            message,
        }
    }

    pub fn min(bound: f64, message: &'static str) -> Self {
        Self {
            constraint: Constraint::Min(bound),
            message,
        }
    }

    pub fn max(bound: f64, message: &'static str) -> Self {
        Self {
            constraint: Constraint::Max(bound),
            message,
        }
    }

    pub fn min_length(length: usize, message: &'static str) -> Self {
        Self {
            constraint: Constraint::MinLength(length),
            message,
        }
    }

    /// Empty values are the province of `Required`; the other constraints
    /// pass on empty input so their messages never mask the required one.
    fn passes(&self, value: &str) -> bool {
        let trimmed = value.trim();
        match &self.constraint {
            Constraint::Required => !trimmed.is_empty(),
            Constraint::Pattern(re) => trimmed.is_empty() || re.is_match(trimmed),
            Constraint::Min(bound) => {
                trimmed.is_empty() || trimmed.parse::<f64>().is_ok_and(|n| n >= *bound)
            }
            Constraint::Max(bound) => {
                trimmed.is_empty() || trimmed.parse::<f64>().is_ok_and(|n| n <= *bound)
            }
            Constraint::MinLength(length) => {
                trimmed.is_empty() || trimmed.chars().count() >= *length
            }
        }
    }
}

/// Ordered rules for one named field.
#[derive(Clone, Debug)]
pub struct FieldRules {
    pub name: &'static str,
    pub rules: Vec<Rule>,
}

// ============================================================================
// Evaluation
// ============================================================================

/// Evaluate one field; returns the first failing rule's message.
pub fn validate_field(field: &FieldRules, value: &str) -> Option<&'static str> {
    field.rules
        .iter()
        .find(|rule| !rule.passes(value))
        .map(|rule| rule.message)
}

/// Evaluate every field and collect one message per failing field.
pub fn validate_form(
    fields: &[FieldRules],
    values: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut errors = HashMap::new();
    for field in fields {
        let value = values.get(field.name).map(String::as_str).unwrap_or("");
        if let Some(message) = validate_field(field, value) {
            errors.insert(field.name.to_string(), message.to_string());
        }
    }
    errors
}

// ============================================================================
// Rule sets
// ============================================================================

pub fn registration_rules() -> Vec<FieldRules> {
    vec![
        FieldRules {
            name: FIRST_NAME,
            rules: vec![Rule::required("First name is required")],
        },
        FieldRules {
            name: LAST_NAME,
            rules: vec![Rule::required("Last name is required")],
        },
        FieldRules {
            name: AGE,
            rules: vec![
                Rule::required("Age is required"),
                Rule::min(0.0, "Age must be positive"),
                Rule::max(120.0, "Invalid age"),
            ],
        },
        FieldRules {
            name: EMAIL,
            rules: vec![
                Rule::required("Email is required"),
                Rule::pattern(&EMAIL_RE, "Invalid email address"),
            ],
        },
        FieldRules {
            name: PHONE,
            rules: vec![
                Rule::required("Phone number is required"),
                Rule::pattern(&PHONE_RE, "Invalid phone number"),
            ],
        },
        FieldRules {
            name: ADDRESS,
            rules: vec![Rule::required("Address is required")],
        },
    ]
}

pub fn login_rules() -> Vec<FieldRules> {
    vec![
        FieldRules {
            name: EMAIL,
            rules: vec![
                Rule::required("Email is required"),
                Rule::pattern(&EMAIL_RE, "Invalid email address"),
            ],
        },
        FieldRules {
            name: PASSWORD,
            rules: vec![
                Rule::required("Password is required"),
                Rule::min_length(8, "Password must be at least 8 characters"),
            ],
        },
    ]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn valid_registration() -> HashMap<String, String> {
        values(&[
            (FIRST_NAME, "Ana"),
            (LAST_NAME, "Souza"),
            (AGE, "30"),
            (EMAIL, "user@example.com"),
            (PHONE, "+1 (555) 000-0000"),
            (ADDRESS, "12 Main St"),
        ])
    }

    #[test]
    fn test_all_valid_registration_has_no_errors() {
        let errors = validate_form(&registration_rules(), &valid_registration());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_missing_required_field_uses_configured_message() {
        let mut vals = valid_registration();
        vals.remove(FIRST_NAME);
        let errors = validate_form(&registration_rules(), &vals);
        assert_eq!(errors.get(FIRST_NAME).map(String::as_str), Some("First name is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_all_failing_fields_reported_simultaneously() {
        let errors = validate_form(&registration_rules(), &HashMap::new());
        assert_eq!(errors.len(), REGISTRATION_FIELDS.len());
        assert_eq!(errors.get(LAST_NAME).map(String::as_str), Some("Last name is required"));
        assert_eq!(errors.get(ADDRESS).map(String::as_str), Some("Address is required"));
    }

    #[test]
    fn test_first_failing_rule_per_field_wins() {
        // Empty age fails both required and the numeric bounds; only the
        // required message may surface.
        let mut vals = valid_registration();
        vals.insert(AGE.to_string(), String::new());
        let errors = validate_form(&registration_rules(), &vals);
        assert_eq!(errors.get(AGE).map(String::as_str), Some("Age is required"));
    }

    #[test]
    fn test_email_pattern() {
        let mut vals = valid_registration();
        vals.insert(EMAIL.to_string(), "not-an-email".to_string());
        let errors = validate_form(&registration_rules(), &vals);
        assert_eq!(errors.get(EMAIL).map(String::as_str), Some("Invalid email address"));

        vals.insert(EMAIL.to_string(), "user@example.com".to_string());
        assert!(validate_form(&registration_rules(), &vals).is_empty());
    }

    #[test]
    fn test_phone_pattern() {
        let mut vals = valid_registration();
        vals.insert(PHONE.to_string(), "abc".to_string());
        let errors = validate_form(&registration_rules(), &vals);
        assert_eq!(errors.get(PHONE).map(String::as_str), Some("Invalid phone number"));

        for accepted in ["+1 (555) 000-0000", "555-123-4567", "5551234567"] {
            vals.insert(PHONE.to_string(), accepted.to_string());
            assert!(
                validate_form(&registration_rules(), &vals).is_empty(),
                "{accepted} should be accepted"
            );
        }
    }

    #[test]
    fn test_age_bounds_are_inclusive() {
        let mut vals = valid_registration();

        vals.insert(AGE.to_string(), "-1".to_string());
        let errors = validate_form(&registration_rules(), &vals);
        assert_eq!(errors.get(AGE).map(String::as_str), Some("Age must be positive"));

        vals.insert(AGE.to_string(), "121".to_string());
        let errors = validate_form(&registration_rules(), &vals);
        assert_eq!(errors.get(AGE).map(String::as_str), Some("Invalid age"));

        for accepted in ["0", "120"] {
            vals.insert(AGE.to_string(), accepted.to_string());
            assert!(
                validate_form(&registration_rules(), &vals).is_empty(),
                "age {accepted} should be accepted"
            );
        }
    }

    #[test]
    fn test_non_numeric_age_fails_bounds() {
        let mut vals = valid_registration();
        vals.insert(AGE.to_string(), "abc".to_string());
        let errors = validate_form(&registration_rules(), &vals);
        assert_eq!(errors.get(AGE).map(String::as_str), Some("Age must be positive"));
    }

    #[test]
    fn test_login_rules() {
        let vals = values(&[(EMAIL, "user@example.com"), (PASSWORD, "longenough")]);
        assert!(validate_form(&login_rules(), &vals).is_empty());

        let vals = values(&[(EMAIL, "user@example.com"), (PASSWORD, "short")]);
        let errors = validate_form(&login_rules(), &vals);
        assert_eq!(
            errors.get(PASSWORD).map(String::as_str),
            Some("Password must be at least 8 characters")
        );

        let errors = validate_form(&login_rules(), &HashMap::new());
        assert_eq!(errors.get(EMAIL).map(String::as_str), Some("Email is required"));
        assert_eq!(errors.get(PASSWORD).map(String::as_str), Some("Password is required"));
    }
}
