use utoipa::OpenApi;

use super::handlers::{health, login, me, session, signup, types};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        signup::signup,
        login::login,
        session::logout,
        me::profile,
        me::change_password,
    ),
    components(schemas(
        health::Health,
        types::SignupRequest,
        types::LoginRequest,
        types::ChangePasswordRequest,
        types::AuthResponse,
        types::IdentityResponse,
        types::MessageResponse,
    )),
    tags(
        (name = "gramvantage", description = "Identity API for the GramVantage civic engagement platform"),
        (name = "auth", description = "Registration, login, and logout"),
        (name = "me", description = "Authenticated self-service")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_documents_every_route() {
        let spec = openapi();
        let paths = &spec.paths.paths;

        for path in [
            "/health",
            "/v1/auth/signup",
            "/v1/auth/login/{actor_kind}",
            "/v1/auth/logout",
            "/v1/me",
            "/v1/me/password",
        ] {
            assert!(paths.contains_key(path), "missing path: {path}");
        }
    }

    #[test]
    fn openapi_registers_schemas() {
        let spec = openapi();
        let components = spec.components.expect("components");
        for schema in [
            "Health",
            "SignupRequest",
            "LoginRequest",
            "ChangePasswordRequest",
            "AuthResponse",
            "IdentityResponse",
            "MessageResponse",
        ] {
            assert!(
                components.schemas.contains_key(schema),
                "missing schema: {schema}"
            );
        }
    }
}
