pub mod health;
pub use self::health::health;

pub mod signup;
pub use self::signup::signup;

pub mod login;
pub use self::login::login;

pub mod me;
pub mod session;
pub mod types;

// common glue for the handlers
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use tracing::error;

use crate::identity::IdentityError;

// axum handler for the index route
pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "Welcome to GramVantage API" }))
}

/// Map a domain error onto the wire taxonomy.
///
/// Validation and conflict failures carry their field messages; both
/// authentication failures stay generic; operational detail is logged and
/// never returned to the client.
pub(crate) fn error_response(err: IdentityError) -> (StatusCode, String) {
    match err {
        IdentityError::Validation(errors) => (StatusCode::BAD_REQUEST, errors.to_string()),
        IdentityError::Conflict(field) => (StatusCode::CONFLICT, field.message().to_string()),
        IdentityError::InvalidCredentials | IdentityError::InvalidToken => {
            (StatusCode::UNAUTHORIZED, err.to_string())
        }
        IdentityError::Hashing | IdentityError::TokenSigning(_) | IdentityError::Database(_) => {
            error!("internal error: {err:?}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong!".to_string(),
            )
        }
    }
}
