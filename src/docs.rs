use turnstile_config::routes::DEFAULT_API_AUTH_PREFIX;
use turnstile_config::session::DEFAULT_SESSION_COOKIE_NAME;
use turnstile_models::{UserInfo, UserRole};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::model::{
    ActionFailure, ActionSuccess, LoginError, LoginRequest, RegisterError, RegisterRequest,
    RegisterSuccess, SessionResponse,
};
use crate::modules::pages::model::{
    AuthErrorPage, AuthPage, Dashboard, DashboardView, HealthResponse, LandingPage,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::logout_user,
        crate::modules::auth::controller::get_session,
        crate::modules::pages::controller::landing_page,
        crate::modules::pages::controller::login_page,
        crate::modules::pages::controller::register_page,
        crate::modules::pages::controller::auth_error_page,
        crate::modules::pages::controller::app_page,
        crate::modules::pages::controller::health,
    ),
    components(
        schemas(
            UserRole,
            UserInfo,
            LoginRequest,
            RegisterRequest,
            LoginError,
            RegisterError,
            RegisterSuccess,
            ActionSuccess,
            ActionFailure,
            SessionResponse,
            LandingPage,
            AuthPage,
            AuthErrorPage,
            Dashboard,
            DashboardView,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, registration and session endpoints"),
        (name = "Pages", description = "Public, auth-only and protected pages"),
        (name = "Health", description = "Liveness probe")
    ),
    info(
        title = "Turnstile API",
        version = "0.1.0",
        description = "Username and password authentication with cookie sessions and a route access gate.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

/// The OpenAPI document for a running configuration.
///
/// Handler annotations carry the default auth prefix and cookie name; both
/// are rewritten here so the served document matches the mounted routes.
pub fn openapi_for(api_auth_prefix: &str, cookie_name: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();

    if api_auth_prefix != DEFAULT_API_AUTH_PREFIX {
        doc.paths.paths = std::mem::take(&mut doc.paths.paths)
            .into_iter()
            .map(|(path, item)| match path.strip_prefix(DEFAULT_API_AUTH_PREFIX) {
                Some(rest) => (format!("{api_auth_prefix}{rest}"), item),
                None => (path, item),
            })
            .collect();
    }

    if let Some(components) = doc.components.as_mut() {
        components.add_security_scheme("session_cookie", session_cookie_scheme(cookie_name));
    }

    doc
}

fn session_cookie_scheme(cookie_name: &str) -> SecurityScheme {
    SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(cookie_name)))
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                session_cookie_scheme(DEFAULT_SESSION_COOKIE_NAME),
            )
        }
    }
}
