use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::{
    error_response,
    types::{AuthResponse, SignupRequest},
};
use crate::identity::{password, repo, validate, validate::SignupInput, IdentityError, TokenKeys};

#[utoipa::path(
    post,
    path= "/v1/auth/signup",
    request_body = SignupRequest,
    responses (
        (status = 201, description = "Registration successful", body = [AuthResponse]),
        (status = 400, description = "One or more fields failed validation"),
        (status = 409, description = "Email, organization code, or mobile number already registered"),
    ),
    tag= "auth"
)]
// axum handler for registration. The payload carries a plaintext password,
// so nothing from it is logged.
#[instrument(skip_all)]
pub async fn signup(
    pool: Extension<PgPool>,
    keys: Extension<Arc<TokenKeys>>,
    payload: Option<Json<SignupRequest>>,
) -> impl IntoResponse {
    let Some(Json(request)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response();
    };

    let registration = match validate::validate(&SignupInput::from(&request)) {
        Ok(registration) => registration,
        Err(errors) => {
            return error_response(IdentityError::Validation(errors)).into_response();
        }
    };

    // Hash before touching the store; the plaintext goes no further.
    let password_hash = match password::hash(&request.password) {
        Ok(hash) => hash,
        Err(err) => return error_response(err).into_response(),
    };

    let identity = match repo::insert(&pool, &registration, &password_hash).await {
        Ok(identity) => identity,
        Err(err) => return error_response(err).into_response(),
    };

    debug!("registered {} {}", identity.kind, identity.id);

    let token = match keys.issue(identity.id) {
        Ok(token) => token,
        Err(err) => return error_response(err).into_response(),
    };

    (
        StatusCode::CREATED,
        Json(AuthResponse {
            user: identity.into(),
            token,
        }),
    )
        .into_response()
}
