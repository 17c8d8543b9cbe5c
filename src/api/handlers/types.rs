//! Request/response types for the identity endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::identity::validate::SignupInput;
use crate::identity::{ActorKind, Identity};

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SignupRequest {
    pub actor_kind: String,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_code: Option<String>,
}

impl From<&SignupRequest> for SignupInput {
    fn from(request: &SignupRequest) -> Self {
        Self {
            actor_kind: request.actor_kind.clone(),
            name: request.name.clone(),
            email: request.email.clone(),
            password: request.password.clone(),
            mobile_number: request.mobile_number.clone(),
            national_id: request.national_id.clone(),
            organization_code: request.organization_code.clone(),
        }
    }
}

/// Login credentials. `identifier` is the mobile number for citizens and the
/// organization code for officials and NGOs.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Identity record as exposed to clients. Secret fields never appear here.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct IdentityResponse {
    pub id: Uuid,
    pub actor_kind: ActorKind,
    pub display_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_code: Option<String>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Identity> for IdentityResponse {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            actor_kind: identity.kind,
            display_name: identity.display_name,
            email: identity.email,
            mobile_number: identity.keys.mobile_number().map(str::to_string),
            national_id: identity.keys.national_id().map(str::to_string),
            organization_code: identity.keys.organization_code().map(str::to_string),
            last_login_at: identity.last_login_at,
            created_at: identity.created_at,
            updated_at: identity.updated_at,
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub user: IdentityResponse,
    pub token: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::ActorKeys;
    use anyhow::{Context, Result};
    use chrono::Utc;

    fn citizen() -> Identity {
        let now = Utc::now();
        Identity {
            id: Uuid::new_v4(),
            kind: ActorKind::Citizen,
            keys: ActorKeys::Citizen {
                mobile_number: "9876543210".to_string(),
                national_id: "123456789012".to_string(),
            },
            display_name: "A B".to_string(),
            email: "a@b.com".to_string(),
            password_hash: "$argon2id$opaque".to_string(),
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn signup_request_accepts_missing_optional_fields() -> Result<()> {
        let request: SignupRequest = serde_json::from_value(serde_json::json!({
            "actor_kind": "official",
            "name": "District Office",
            "email": "office@district.gov",
            "password": "secret1",
            "organization_code": "12345"
        }))?;
        assert_eq!(request.mobile_number, None);
        assert_eq!(request.organization_code.as_deref(), Some("12345"));
        Ok(())
    }

    #[test]
    fn identity_response_never_contains_the_password_hash() -> Result<()> {
        let response = IdentityResponse::from(citizen());
        let value = serde_json::to_value(&response)?;
        let rendered = value.to_string();
        assert!(!rendered.contains("password"));
        assert!(!rendered.contains("argon2"));

        let mobile = value
            .get("mobile_number")
            .and_then(serde_json::Value::as_str)
            .context("missing mobile_number")?;
        assert_eq!(mobile, "9876543210");
        assert_eq!(value.get("organization_code"), None);
        Ok(())
    }

    #[test]
    fn auth_response_round_trips() -> Result<()> {
        let response = AuthResponse {
            user: IdentityResponse::from(citizen()),
            token: "signed".to_string(),
        };
        let value = serde_json::to_value(&response)?;
        let decoded: AuthResponse = serde_json::from_value(value)?;
        assert_eq!(decoded.token, "signed");
        assert_eq!(decoded.user.actor_kind, ActorKind::Citizen);
        Ok(())
    }
}
