//! Postgres persistence for identity records.
//!
//! Uniqueness of email, organization code, and citizen mobile number is
//! enforced by partial unique indexes, so concurrent registrations racing on
//! the same key produce exactly one row; losers surface as conflicts.

use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

use super::error::{ConflictField, IdentityError};
use super::models::{ActorKind, Identity, Registration};

const CREATE_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS identities (
        id            UUID PRIMARY KEY,
        actor_kind    TEXT NOT NULL CHECK (actor_kind IN ('citizen', 'official', 'ngo')),
        mobile_number TEXT,
        national_id   TEXT,
        org_code      TEXT,
        display_name  TEXT NOT NULL,
        email         TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        last_login_at TIMESTAMPTZ,
        created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT identities_kind_keys CHECK (
            (
                actor_kind = 'citizen'
                AND mobile_number IS NOT NULL
                AND national_id IS NOT NULL
                AND org_code IS NULL
            )
            OR (
                actor_kind IN ('official', 'ngo')
                AND org_code IS NOT NULL
                AND mobile_number IS NULL
                AND national_id IS NULL
            )
        )
    )
";

// Organization codes are unique across officials and NGOs together; mobile
// numbers only among citizens.
const CREATE_INDICES: [&str; 3] = [
    "CREATE UNIQUE INDEX IF NOT EXISTS identities_email_key ON identities (email)",
    "CREATE UNIQUE INDEX IF NOT EXISTS identities_org_code_key ON identities (org_code) \
     WHERE org_code IS NOT NULL",
    "CREATE UNIQUE INDEX IF NOT EXISTS identities_mobile_number_key ON identities (mobile_number) \
     WHERE actor_kind = 'citizen'",
];

/// Create the `identities` table and its unique indexes if missing.
///
/// # Errors
///
/// Returns the underlying database error when a statement fails.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::Error> {
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "CREATE TABLE"
    );
    sqlx::query(CREATE_TABLE)
        .execute(pool)
        .instrument(span)
        .await?;

    for statement in CREATE_INDICES {
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "CREATE INDEX",
            db.statement = statement
        );
        sqlx::query(statement).execute(pool).instrument(span).await?;
    }

    Ok(())
}

/// Insert a validated registration with its hashed password.
///
/// The insert is the uniqueness check: a duplicate key is reported as a
/// domain conflict naming the collided identifier, not as a storage fault.
///
/// # Errors
///
/// [`IdentityError::Conflict`] on a duplicate email, organization code, or
/// mobile number; [`IdentityError::Database`] otherwise.
pub async fn insert(
    pool: &PgPool,
    registration: &Registration,
    password_hash: &str,
) -> Result<Identity, IdentityError> {
    let query = r"
        INSERT INTO identities
            (id, actor_kind, mobile_number, national_id, org_code, display_name, email, password_hash)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    sqlx::query_as::<_, Identity>(query)
        .bind(Uuid::new_v4())
        .bind(registration.kind.as_str())
        .bind(registration.keys.mobile_number())
        .bind(registration.keys.national_id())
        .bind(registration.keys.organization_code())
        .bind(&registration.display_name)
        .bind(&registration.email)
        .bind(password_hash)
        .fetch_one(pool)
        .instrument(span)
        .await
        .map_err(|err| match conflict_field(&err) {
            Some(field) => IdentityError::Conflict(field),
            None => IdentityError::Database(err),
        })
}

/// Look an identity up by its login key for the given kind: mobile number
/// for citizens, organization code for officials and NGOs.
///
/// # Errors
///
/// Returns [`IdentityError::Database`] when the query fails.
pub async fn find_by_login_key(
    pool: &PgPool,
    kind: ActorKind,
    identifier: &str,
) -> Result<Option<Identity>, IdentityError> {
    let query = match kind {
        ActorKind::Citizen => {
            "SELECT * FROM identities WHERE actor_kind = $1 AND mobile_number = $2"
        }
        ActorKind::Official | ActorKind::Ngo => {
            "SELECT * FROM identities WHERE actor_kind = $1 AND org_code = $2"
        }
    };
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let identity = sqlx::query_as::<_, Identity>(query)
        .bind(kind.as_str())
        .bind(identifier)
        .fetch_optional(pool)
        .instrument(span)
        .await?;

    Ok(identity)
}

/// Look an identity up by id (used to resolve bearer tokens).
///
/// # Errors
///
/// Returns [`IdentityError::Database`] when the query fails.
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Identity>, IdentityError> {
    let query = "SELECT * FROM identities WHERE id = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let identity = sqlx::query_as::<_, Identity>(query)
        .bind(id)
        .fetch_optional(pool)
        .instrument(span)
        .await?;

    Ok(identity)
}

/// Record a successful authentication, returning the updated row.
///
/// # Errors
///
/// Returns [`IdentityError::Database`] when the identity vanished or the
/// update fails.
pub async fn touch_last_login(pool: &PgPool, id: Uuid) -> Result<Identity, IdentityError> {
    let query = r"
        UPDATE identities
        SET last_login_at = NOW(),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );
    let identity = sqlx::query_as::<_, Identity>(query)
        .bind(id)
        .fetch_one(pool)
        .instrument(span)
        .await?;

    Ok(identity)
}

/// Replace the stored password hash. Always writes; re-hashing is the
/// caller's responsibility and happens unconditionally.
///
/// # Errors
///
/// Returns [`IdentityError::Database`] when no row matched or the update
/// fails.
pub async fn update_password(
    pool: &PgPool,
    id: Uuid,
    password_hash: &str,
) -> Result<(), IdentityError> {
    let query = r"
        UPDATE identities
        SET password_hash = $2,
            updated_at = NOW()
        WHERE id = $1
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );
    let result = sqlx::query(query)
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .instrument(span)
        .await?;

    if result.rows_affected() == 0 {
        return Err(IdentityError::Database(sqlx::Error::RowNotFound));
    }

    Ok(())
}

fn conflict_field(err: &sqlx::Error) -> Option<ConflictField> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    if !db_err.code().is_some_and(|code| code.as_ref() == "23505") {
        return None;
    }
    match db_err.constraint() {
        Some("identities_email_key") => Some(ConflictField::Email),
        Some("identities_org_code_key") => Some(ConflictField::OrganizationCode),
        Some("identities_mobile_number_key") => Some(ConflictField::MobileNumber),
        _ => None,
    }
}
