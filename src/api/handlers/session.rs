//! Bearer-token authentication helpers and logout.

use axum::{
    extract::Extension,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;

use super::types::MessageResponse;
use crate::identity::{repo, Identity, TokenKeys};

/// Authenticated caller context derived from the bearer token.
#[derive(Debug, Clone)]
pub struct Principal {
    pub identity: Identity,
}

/// Resolve the bearer token into the caller's identity record.
///
/// A missing header, a bad signature, an expired token, and a vanished
/// identity are indistinguishable to the caller: all come back as 401.
pub(crate) async fn require_auth(
    headers: &HeaderMap,
    pool: &PgPool,
    keys: &TokenKeys,
) -> Result<Principal, StatusCode> {
    let Some(token) = extract_bearer_token(headers) else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    let claims = match keys.verify(&token) {
        Ok(claims) => claims,
        Err(_) => return Err(StatusCode::UNAUTHORIZED),
    };

    match repo::find_by_id(pool, claims.sub).await {
        Ok(Some(identity)) => Ok(Principal { identity }),
        Ok(None) => Err(StatusCode::UNAUTHORIZED),
        Err(err) => {
            error!("Failed to resolve principal: {err:?}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[utoipa::path(
    post,
    path= "/v1/auth/logout",
    responses (
        (status = 200, description = "Logged out", body = [MessageResponse]),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    tag= "auth"
)]
// axum handler for logout. Tokens are stateless, so there is nothing to
// revoke; this only proves the caller held a valid token.
pub async fn logout(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    keys: Extension<Arc<TokenKeys>>,
) -> impl IntoResponse {
    match require_auth(&headers, &pool, &keys).await {
        Ok(_) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Logged out successfully".to_string(),
            }),
        )
            .into_response(),
        Err(status) => status.into_response(),
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
