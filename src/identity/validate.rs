//! Registration validation: actor-kind-conditional field requirements.
//!
//! Rules depend on the submitted kind: citizens must present a 10-digit
//! mobile number and a 12-digit national id, officials and NGOs a 5-digit
//! organization code. All violations are collected, not just the first.
//! Uniqueness is not checked here; the store enforces it at insert time.

use regex::Regex;

use super::error::ValidationErrors;
use super::models::{ActorKeys, ActorKind, Registration};

/// Raw, untrusted signup fields as submitted by the client.
#[derive(Debug, Default, Clone)]
pub struct SignupInput {
    pub actor_kind: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub mobile_number: Option<String>,
    pub national_id: Option<String>,
    pub organization_code: Option<String>,
}

/// Normalize an email for lookup/uniqueness checks.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Basic email format check on already-normalized input.
pub(crate) fn valid_email(email_normalized: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email_normalized))
}

fn exact_digits(value: &str, count: usize) -> bool {
    value.len() == count && value.bytes().all(|b| b.is_ascii_digit())
}

/// Validate a signup submission into a schema-conformant draft.
///
/// An unknown actor kind is reported alone, since none of the conditional
/// rules can be applied without it. Every other violation is collected into
/// the returned [`ValidationErrors`].
///
/// # Errors
///
/// Returns the full list of failing fields when any rule is violated.
pub fn validate(input: &SignupInput) -> Result<Registration, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let Some(kind) = ActorKind::parse(input.actor_kind.trim()) else {
        errors.push("Invalid user type");
        return Err(errors);
    };

    if kind == ActorKind::Citizen
        && input
            .organization_code
            .as_deref()
            .is_some_and(|code| !code.trim().is_empty())
    {
        errors.push("Code field is not required for citizens");
    }

    if input.password.chars().count() < 6 {
        errors.push("Password must be at least 6 characters long");
    }

    let display_name = input.name.trim().to_string();
    if display_name.chars().count() < 2 {
        errors.push("Name must be at least 2 characters long");
    }

    let email = normalize_email(&input.email);
    if !valid_email(&email) {
        errors.push("Invalid email format");
    }

    let keys = match kind {
        ActorKind::Citizen => {
            let mobile_number = input.mobile_number.clone().unwrap_or_default();
            if !exact_digits(&mobile_number, 10) {
                errors.push("Mobile number must be 10 digits");
            }
            let national_id = input.national_id.clone().unwrap_or_default();
            if !exact_digits(&national_id, 12) {
                errors.push("Aadhar number must be 12 digits");
            }
            ActorKeys::Citizen {
                mobile_number,
                national_id,
            }
        }
        ActorKind::Official | ActorKind::Ngo => {
            let code = input.organization_code.clone().unwrap_or_default();
            if !exact_digits(&code, 5) {
                errors.push("Organization code must be 5 digits");
            }
            ActorKeys::Organization { code }
        }
    };

    if errors.is_empty() {
        Ok(Registration {
            kind,
            keys,
            display_name,
            email,
        })
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn citizen_input() -> SignupInput {
        SignupInput {
            actor_kind: "citizen".to_string(),
            name: "A B".to_string(),
            email: "a@b.com".to_string(),
            password: "secret1".to_string(),
            mobile_number: Some("9876543210".to_string()),
            national_id: Some("123456789012".to_string()),
            organization_code: None,
        }
    }

    fn official_input() -> SignupInput {
        SignupInput {
            actor_kind: "official".to_string(),
            name: "District Office".to_string(),
            email: "office@district.gov".to_string(),
            password: "secret1".to_string(),
            mobile_number: None,
            national_id: None,
            organization_code: Some("12345".to_string()),
        }
    }

    #[test]
    fn citizen_registration_passes() {
        let registration = validate(&citizen_input()).expect("valid citizen");
        assert_eq!(registration.kind, ActorKind::Citizen);
        assert_eq!(registration.keys.login_key(), "9876543210");
        assert_eq!(registration.email, "a@b.com");
    }

    #[test]
    fn official_registration_passes_without_citizen_fields() {
        let registration = validate(&official_input()).expect("valid official");
        assert_eq!(registration.kind, ActorKind::Official);
        assert_eq!(registration.keys.login_key(), "12345");
    }

    #[test]
    fn ngo_requires_five_digit_code() {
        let mut input = official_input();
        input.actor_kind = "ngo".to_string();
        input.organization_code = Some("12AB3".to_string());
        let errors = validate(&input).expect_err("non-digit code");
        assert_eq!(errors.messages(), ["Organization code must be 5 digits"]);
    }

    #[test]
    fn unknown_actor_kind_is_reported_alone() {
        let mut input = citizen_input();
        input.actor_kind = "admin".to_string();
        input.password = String::new();
        let errors = validate(&input).expect_err("unknown kind");
        assert_eq!(errors.messages(), ["Invalid user type"]);
    }

    #[test]
    fn citizen_rejects_organization_code() {
        let mut input = citizen_input();
        input.organization_code = Some("12345".to_string());
        let errors = validate(&input).expect_err("code not applicable");
        assert_eq!(errors.messages(), ["Code field is not required for citizens"]);
    }

    #[test]
    fn citizen_mobile_and_national_id_lengths_are_exact() {
        let mut input = citizen_input();
        input.mobile_number = Some("98765".to_string());
        input.national_id = Some("123".to_string());
        let errors = validate(&input).expect_err("short identifiers");
        assert_eq!(
            errors.messages(),
            [
                "Mobile number must be 10 digits",
                "Aadhar number must be 12 digits"
            ]
        );
    }

    #[test]
    fn citizen_missing_identifiers_are_rejected() {
        let mut input = citizen_input();
        input.mobile_number = None;
        input.national_id = None;
        let errors = validate(&input).expect_err("missing identifiers");
        assert_eq!(errors.messages().len(), 2);
    }

    #[test]
    fn non_digit_mobile_is_rejected() {
        let mut input = citizen_input();
        input.mobile_number = Some("98765A3210".to_string());
        let errors = validate(&input).expect_err("alpha in mobile");
        assert_eq!(errors.messages(), ["Mobile number must be 10 digits"]);
    }

    #[test]
    fn all_violations_are_collected() {
        let input = SignupInput {
            actor_kind: "citizen".to_string(),
            name: "X".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            mobile_number: None,
            national_id: None,
            organization_code: Some("12345".to_string()),
        };
        let errors = validate(&input).expect_err("everything wrong");
        assert_eq!(
            errors.messages(),
            [
                "Code field is not required for citizens",
                "Password must be at least 6 characters long",
                "Name must be at least 2 characters long",
                "Invalid email format",
                "Mobile number must be 10 digits",
                "Aadhar number must be 12 digits"
            ]
        );
    }

    #[test]
    fn email_is_normalized_and_name_trimmed() {
        let mut input = citizen_input();
        input.email = " Alice@Example.COM ".to_string();
        input.name = "  Alice  ".to_string();
        let registration = validate(&input).expect("valid after normalization");
        assert_eq!(registration.email, "alice@example.com");
        assert_eq!(registration.display_name, "Alice");
    }

    #[test]
    fn official_does_not_require_citizen_identifiers() {
        let mut input = official_input();
        input.mobile_number = None;
        input.national_id = None;
        assert!(validate(&input).is_ok());
    }
}
