//! Authenticated self-service endpoints.

use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::instrument;

use super::{
    error_response,
    session::require_auth,
    types::{ChangePasswordRequest, IdentityResponse, MessageResponse},
};
use crate::identity::{error::ValidationErrors, password, repo, IdentityError, TokenKeys};

#[utoipa::path(
    get,
    path= "/v1/me",
    responses (
        (status = 200, description = "Return the authenticated caller's identity record", body = [IdentityResponse]),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    tag= "me"
)]
// axum handler for the caller's own profile
pub async fn profile(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    keys: Extension<Arc<TokenKeys>>,
) -> impl IntoResponse {
    match require_auth(&headers, &pool, &keys).await {
        Ok(principal) => (
            StatusCode::OK,
            Json(IdentityResponse::from(principal.identity)),
        )
            .into_response(),
        Err(status) => status.into_response(),
    }
}

#[utoipa::path(
    post,
    path= "/v1/me/password",
    request_body = ChangePasswordRequest,
    responses (
        (status = 200, description = "Password updated", body = [MessageResponse]),
        (status = 400, description = "New password failed validation"),
        (status = 401, description = "Missing token or wrong current password"),
    ),
    tag= "me"
)]
// axum handler for password changes. The new password is always re-hashed
// with a fresh salt, there is no modified-check.
#[instrument(skip_all)]
pub async fn change_password(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    keys: Extension<Arc<TokenKeys>>,
    payload: Option<Json<ChangePasswordRequest>>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &pool, &keys).await {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    let Some(Json(request)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response();
    };

    if !password::verify(&request.current_password, &principal.identity.password_hash) {
        return error_response(IdentityError::InvalidCredentials).into_response();
    }

    if request.new_password.chars().count() < 6 {
        let mut errors = ValidationErrors::default();
        errors.push("Password must be at least 6 characters long");
        return error_response(IdentityError::Validation(errors)).into_response();
    }

    let password_hash = match password::hash(&request.new_password) {
        Ok(hash) => hash,
        Err(err) => return error_response(err).into_response(),
    };

    if let Err(err) = repo::update_password(&pool, principal.identity.id, &password_hash).await {
        return error_response(err).into_response();
    }

    (
        StatusCode::OK,
        Json(MessageResponse {
            message: "Password updated successfully".to_string(),
        }),
    )
        .into_response()
}
