use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::{
    error_response,
    types::{AuthResponse, LoginRequest},
};
use crate::identity::{password, repo, ActorKind, IdentityError, TokenKeys};

#[utoipa::path(
    post,
    path= "/v1/auth/login/{actor_kind}",
    params(
        ("actor_kind" = String, Path, description = "citizen, official, or ngo")
    ),
    request_body = LoginRequest,
    responses (
        (status = 200, description = "Login successful", body = [AuthResponse]),
        (status = 401, description = "Unauthorized"),
    ),
    tag= "auth"
)]
// axum handler for login. A missing record and a wrong password produce the
// same response, so callers cannot probe which identifiers exist.
#[instrument(skip_all)]
pub async fn login(
    Path(actor_kind): Path<String>,
    pool: Extension<PgPool>,
    keys: Extension<Arc<TokenKeys>>,
    payload: Option<Json<LoginRequest>>,
) -> impl IntoResponse {
    let Some(Json(request)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response();
    };

    let Some(kind) = ActorKind::parse(actor_kind.trim()) else {
        return (StatusCode::BAD_REQUEST, "Invalid user type".to_string()).into_response();
    };

    let identity = match repo::find_by_login_key(&pool, kind, request.identifier.trim()).await {
        Ok(Some(identity)) => identity,
        Ok(None) => return error_response(IdentityError::InvalidCredentials).into_response(),
        Err(err) => return error_response(err).into_response(),
    };

    if !password::verify(&request.password, &identity.password_hash) {
        return error_response(IdentityError::InvalidCredentials).into_response();
    }

    let identity = match repo::touch_last_login(&pool, identity.id).await {
        Ok(identity) => identity,
        Err(err) => return error_response(err).into_response(),
    };

    debug!("login for {} {}", identity.kind, identity.id);

    let token = match keys.issue(identity.id) {
        Ok(token) => token,
        Err(err) => return error_response(err).into_response(),
    };

    (
        StatusCode::OK,
        Json(AuthResponse {
            user: identity.into(),
            token,
        }),
    )
        .into_response()
}
