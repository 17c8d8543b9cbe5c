//! Access token issuance and verification.
//!
//! Tokens are stateless HS256 JWTs binding an identity id to a 7-day expiry.
//! There is no revocation list and no refresh mechanism; expiry is the only
//! invalidation path.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::IdentityError;

/// Access token lifetime in seconds.
pub const TOKEN_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    #[must_use]
    pub fn new(identity_id: Uuid) -> Self {
        Self::issued_at(identity_id, Utc::now().timestamp())
    }

    /// Build claims anchored at an explicit issue time.
    #[must_use]
    pub const fn issued_at(identity_id: Uuid, now_unix_seconds: i64) -> Self {
        Self {
            sub: identity_id,
            iat: now_unix_seconds,
            exp: now_unix_seconds + TOKEN_TTL_SECONDS,
        }
    }
}

/// Signing and verification keys derived from the configured secret.
///
/// The secret comes from explicit configuration only; there is no fallback
/// value, the process refuses to start without one.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenKeys {
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::default();
        // Expiry checks are exact; the default 60s leeway would let a token
        // outlive its lifetime.
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a signed token asserting `identity_id` for the next 7 days.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::TokenSigning`] if claim serialization or
    /// signing fails.
    pub fn issue(&self, identity_id: Uuid) -> Result<String, IdentityError> {
        self.encode(&Claims::new(identity_id))
    }

    /// Sign a prepared claim set.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::TokenSigning`] if claim serialization or
    /// signing fails.
    pub fn encode(&self, claims: &Claims) -> Result<String, IdentityError> {
        jsonwebtoken::encode(&Header::default(), claims, &self.encoding)
            .map_err(IdentityError::TokenSigning)
    }

    /// Verify a presented token and return its claims.
    ///
    /// # Errors
    ///
    /// A bad signature, an elapsed expiry, and malformed input all collapse
    /// into the single [`IdentityError::InvalidToken`]; callers learn nothing
    /// about which check failed.
    pub fn verify(&self, token: &str) -> Result<Claims, IdentityError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| IdentityError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> TokenKeys {
        TokenKeys::new(b"test-secret")
    }

    #[test]
    fn issued_token_verifies_and_carries_the_identity() {
        let keys = keys();
        let id = Uuid::new_v4();

        let token = keys.issue(id).expect("issue");
        let claims = keys.verify(&token).expect("verify");

        assert_eq!(claims.sub, id);
        assert_eq!(claims.exp, claims.iat + TOKEN_TTL_SECONDS);
    }

    #[test]
    fn expiry_is_seven_days_from_issuance() {
        let claims = Claims::issued_at(Uuid::nil(), 1_700_000_000);
        assert_eq!(claims.exp, 1_700_000_000 + 7 * 24 * 60 * 60);
    }

    #[test]
    fn token_past_its_lifetime_is_rejected() {
        let keys = keys();
        let now = Utc::now().timestamp();

        // Issued 7 days and 1 second ago: expired by exactly one second.
        let expired = Claims::issued_at(Uuid::new_v4(), now - TOKEN_TTL_SECONDS - 1);
        let token = keys.encode(&expired).expect("encode");

        assert!(matches!(
            keys.verify(&token),
            Err(IdentityError::InvalidToken)
        ));
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = keys().issue(Uuid::new_v4()).expect("issue");
        let other = TokenKeys::new(b"other-secret");

        assert!(matches!(
            other.verify(&token),
            Err(IdentityError::InvalidToken)
        ));
    }

    #[test]
    fn tampered_token_is_rejected() {
        let keys = keys();
        let token = keys.issue(Uuid::new_v4()).expect("issue");

        let mut tampered = token.clone();
        tampered.pop();

        assert!(matches!(
            keys.verify(&tampered),
            Err(IdentityError::InvalidToken)
        ));
        assert!(matches!(
            keys.verify("not-a-token"),
            Err(IdentityError::InvalidToken)
        ));
    }
}
