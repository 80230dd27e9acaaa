//! Field rules for candidate members.
//!
//! All rules are enforced here, in one place, before anything touches the
//! store. Violations are reported per field; when a field breaks more than
//! one rule the first check wins (length before character class).

use std::sync::LazyLock;

use regex::Regex;

use rollcall_core::{DomainError, DomainResult, Violations};

use crate::member::Member;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,4}$")
        .expect("email pattern must compile")
});

// 10-12 digits, optional leading + for country-code form.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9]{10,12}$").expect("phone pattern must compile")
});

/// Validate a candidate member against all field rules.
///
/// Returns `DomainError::Validation` carrying every failing field.
pub fn validate(member: &Member) -> DomainResult<()> {
    let mut violations = Violations::new();

    let name = member.name();
    if name.is_empty() || name.chars().count() > 25 {
        violations.add("name", "size must be between 1 and 25");
    } else if name.chars().any(|c| c.is_ascii_digit()) {
        violations.add("name", "must not contain numbers");
    }

    let email = member.email();
    if email.is_empty() || email.chars().count() > 50 {
        violations.add("email", "size must be between 1 and 50");
    } else if !EMAIL_PATTERN.is_match(email) {
        violations.add("email", "invalid email address");
    }

    if !PHONE_PATTERN.is_match(member.phone_number()) {
        violations.add("phoneNumber", "must be 10-12 digits, optionally led by +");
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(DomainError::validation(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, email: &str, phone: &str) -> Member {
        Member::new(name, email, phone)
    }

    #[test]
    fn accepts_a_valid_member() {
        let m = candidate("John Doe", "john@example.com", "1234567890");
        assert!(validate(&m).is_ok());
    }

    #[test]
    fn accepts_country_code_phone() {
        let m = candidate("John Doe", "john@example.com", "+441234567890");
        assert!(validate(&m).is_ok());
    }

    #[test]
    fn rejects_empty_name() {
        let m = candidate("", "x@x.com", "1234567890");
        let err = validate(&m).unwrap_err();
        match err {
            DomainError::Validation(v) => {
                assert_eq!(v.get("name"), Some("size must be between 1 and 25"));
                assert_eq!(v.get("email"), None);
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn rejects_name_with_digits() {
        let m = candidate("John 2nd", "john@example.com", "1234567890");
        let err = validate(&m).unwrap_err();
        match err {
            DomainError::Validation(v) => {
                assert_eq!(v.get("name"), Some("must not contain numbers"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn rejects_name_longer_than_25_chars() {
        let m = candidate(&"a".repeat(26), "john@example.com", "1234567890");
        assert!(validate(&m).is_err());
    }

    #[test]
    fn rejects_malformed_email() {
        for email in ["not-an-email", "a@b", "@example.com", "a b@example.com"] {
            let m = candidate("John Doe", email, "1234567890");
            let err = validate(&m).unwrap_err();
            match err {
                DomainError::Validation(v) => {
                    assert!(v.get("email").is_some(), "expected email violation for {email:?}");
                }
                other => panic!("expected Validation, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_short_and_long_phone_numbers() {
        for phone in ["123456789", "1234567890123", "12345abcde", ""] {
            let m = candidate("John Doe", "john@example.com", phone);
            let err = validate(&m).unwrap_err();
            match err {
                DomainError::Validation(v) => {
                    assert!(v.get("phoneNumber").is_some(), "expected phone violation for {phone:?}");
                }
                other => panic!("expected Validation, got {other:?}"),
            }
        }
    }

    #[test]
    fn reports_all_failing_fields_at_once() {
        let m = candidate("", "bogus", "12");
        let err = validate(&m).unwrap_err();
        match err {
            DomainError::Validation(v) => {
                assert!(v.get("name").is_some());
                assert!(v.get("email").is_some());
                assert!(v.get("phoneNumber").is_some());
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
