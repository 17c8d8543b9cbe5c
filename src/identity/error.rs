use thiserror::Error;

/// Identifier that collided with an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictField {
    Email,
    OrganizationCode,
    MobileNumber,
}

impl ConflictField {
    /// Domain message naming the collided identifier so callers can prompt
    /// for a different one.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Email => "Email is already registered. Please use a different email.",
            Self::OrganizationCode => {
                "Organization code is already registered. Please use a different code."
            }
            Self::MobileNumber => {
                "Mobile number is already registered. Please use a different mobile number."
            }
        }
    }
}

/// Every field-level failure found during registration validation, not just
/// the first one encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    messages: Vec<String>,
}

impl ValidationErrors {
    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.messages.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error("{}", .0.message())]
    Conflict(ConflictField),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Invalid token")]
    InvalidToken,
    #[error("failed to hash password")]
    Hashing,
    #[error("failed to sign token")]
    TokenSigning(#[source] jsonwebtoken::errors::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_collect_and_join() {
        let mut errors = ValidationErrors::default();
        assert!(errors.is_empty());

        errors.push("Mobile number must be 10 digits");
        errors.push("Aadhar number must be 12 digits");

        assert_eq!(errors.messages().len(), 2);
        assert_eq!(
            errors.to_string(),
            "Mobile number must be 10 digits, Aadhar number must be 12 digits"
        );
    }

    #[test]
    fn conflict_messages_name_the_identifier() {
        assert!(ConflictField::Email.message().contains("Email"));
        assert!(ConflictField::OrganizationCode
            .message()
            .contains("Organization code"));
        assert!(ConflictField::MobileNumber
            .message()
            .contains("Mobile number"));
    }

    #[test]
    fn credential_and_token_failures_share_no_detail() {
        // Both authentication failures surface a single generic message.
        assert_eq!(
            IdentityError::InvalidCredentials.to_string(),
            "Invalid credentials"
        );
        assert_eq!(IdentityError::InvalidToken.to_string(), "Invalid token");
    }
}
