use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgRow, FromRow, Row};
use utoipa::ToSchema;
use uuid::Uuid;

/// Discriminant classifying a registered identity.
///
/// The kind decides which fields are mandatory and which identifier is used
/// as the login key: mobile number for citizens, organization code for
/// officials and NGOs. Immutable after registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    Citizen,
    Official,
    Ngo,
}

impl ActorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Citizen => "citizen",
            Self::Official => "official",
            Self::Ngo => "ngo",
        }
    }

    /// Parse a client-supplied kind. Anything but the three known values is
    /// rejected.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "citizen" => Some(Self::Citizen),
            "official" => Some(Self::Official),
            "ngo" => Some(Self::Ngo),
            _ => None,
        }
    }

    /// Parse the persisted `identities.actor_kind` textual value.
    fn from_db(value: &str) -> Result<Self, sqlx::Error> {
        Self::parse(value).ok_or_else(|| {
            sqlx::Error::Decode(Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid identities.actor_kind value: {value}"),
            )))
        })
    }
}

impl std::fmt::Display for ActorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-kind identity keys.
///
/// Exactly one variant is populated per record, so a citizen can never carry
/// an organization code and an organization can never carry citizen keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActorKeys {
    Citizen {
        mobile_number: String,
        national_id: String,
    },
    Organization {
        code: String,
    },
}

impl ActorKeys {
    /// The identifier this identity is looked up by at login.
    #[must_use]
    pub fn login_key(&self) -> &str {
        match self {
            Self::Citizen { mobile_number, .. } => mobile_number,
            Self::Organization { code } => code,
        }
    }

    #[must_use]
    pub fn mobile_number(&self) -> Option<&str> {
        match self {
            Self::Citizen { mobile_number, .. } => Some(mobile_number),
            Self::Organization { .. } => None,
        }
    }

    #[must_use]
    pub fn national_id(&self) -> Option<&str> {
        match self {
            Self::Citizen { national_id, .. } => Some(national_id),
            Self::Organization { .. } => None,
        }
    }

    #[must_use]
    pub fn organization_code(&self) -> Option<&str> {
        match self {
            Self::Citizen { .. } => None,
            Self::Organization { code } => Some(code),
        }
    }
}

/// A registered actor as persisted in the `identities` table.
///
/// `password_hash` is the salted one-way form of the password; the plaintext
/// is discarded at registration and never stored or logged. This struct is
/// internal, responses expose a sanitized projection without secret fields.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: Uuid,
    pub kind: ActorKind,
    pub keys: ActorKeys,
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Draft identity admitted by the registration validator.
///
/// Field values are normalized (email lower-cased, name trimmed) and conform
/// to the per-kind schema. The password is not part of the draft; it is
/// hashed separately and joined at insert time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub kind: ActorKind,
    pub keys: ActorKeys,
    pub display_name: String,
    pub email: String,
}

fn required_column(row: &PgRow, column: &str) -> Result<String, sqlx::Error> {
    row.try_get::<Option<String>, _>(column)?.ok_or_else(|| {
        sqlx::Error::Decode(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("identities.{column} is null for a kind that requires it"),
        )))
    })
}

impl<'r> FromRow<'r, PgRow> for Identity {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let kind_raw: String = row.try_get("actor_kind")?;
        let kind = ActorKind::from_db(&kind_raw)?;

        let keys = match kind {
            ActorKind::Citizen => ActorKeys::Citizen {
                mobile_number: required_column(row, "mobile_number")?,
                national_id: required_column(row, "national_id")?,
            },
            ActorKind::Official | ActorKind::Ngo => ActorKeys::Organization {
                code: required_column(row, "org_code")?,
            },
        };

        Ok(Self {
            id: row.try_get("id")?,
            kind,
            keys,
            display_name: row.try_get("display_name")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            last_login_at: row.try_get("last_login_at")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_kind_round_trips_through_str() {
        for kind in [ActorKind::Citizen, ActorKind::Official, ActorKind::Ngo] {
            assert_eq!(ActorKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn actor_kind_rejects_unknown_values() {
        assert_eq!(ActorKind::parse("admin"), None);
        assert_eq!(ActorKind::parse("Citizen"), None);
        assert_eq!(ActorKind::parse(""), None);
    }

    #[test]
    fn actor_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ActorKind::Ngo).expect("serialize");
        assert_eq!(json, "\"ngo\"");
        let decoded: ActorKind = serde_json::from_str("\"official\"").expect("deserialize");
        assert_eq!(decoded, ActorKind::Official);
    }

    #[test]
    fn citizen_login_key_is_mobile_number() {
        let keys = ActorKeys::Citizen {
            mobile_number: "9876543210".to_string(),
            national_id: "123456789012".to_string(),
        };
        assert_eq!(keys.login_key(), "9876543210");
        assert_eq!(keys.mobile_number(), Some("9876543210"));
        assert_eq!(keys.national_id(), Some("123456789012"));
        assert_eq!(keys.organization_code(), None);
    }

    #[test]
    fn organization_login_key_is_code() {
        let keys = ActorKeys::Organization {
            code: "12345".to_string(),
        };
        assert_eq!(keys.login_key(), "12345");
        assert_eq!(keys.mobile_number(), None);
        assert_eq!(keys.national_id(), None);
        assert_eq!(keys.organization_code(), Some("12345"));
    }
}
