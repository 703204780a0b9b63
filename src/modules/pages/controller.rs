use axum::Json;
use axum::extract::{Query, State};
use turnstile_core::AppError;

use super::model::{
    AuthErrorPage, AuthErrorQuery, AuthPage, Dashboard, HealthResponse, LandingPage,
};
use crate::middleware::CurrentSession;
use crate::state::AppState;

/// Landing page
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Landing page", body = LandingPage)),
    tag = "Pages"
)]
pub async fn landing_page(State(state): State<AppState>) -> Json<LandingPage> {
    Json(LandingPage {
        title: "Turnstile".to_string(),
        description: "A basic authentication system".to_string(),
        login: state.access_policy.routes().login_path.clone(),
        register: "/register".to_string(),
    })
}

/// Login form
#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 200, description = "Login form", body = AuthPage),
        (status = 307, description = "Already signed in; redirected to the app")
    ),
    tag = "Pages"
)]
pub async fn login_page(State(state): State<AppState>) -> Json<AuthPage> {
    Json(AuthPage {
        page: "login".to_string(),
        action: format!("{}/login", state.access_policy.routes().api_auth_prefix),
    })
}

/// Registration form
#[utoipa::path(
    get,
    path = "/register",
    responses(
        (status = 200, description = "Registration form", body = AuthPage),
        (status = 307, description = "Already signed in; redirected to the app")
    ),
    tag = "Pages"
)]
pub async fn register_page(State(state): State<AppState>) -> Json<AuthPage> {
    Json(AuthPage {
        page: "register".to_string(),
        action: format!("{}/register", state.access_policy.routes().api_auth_prefix),
    })
}

/// Authentication error page
#[utoipa::path(
    get,
    path = "/error/auth",
    params(AuthErrorQuery),
    responses((status = 200, description = "Authentication error", body = AuthErrorPage)),
    tag = "Pages"
)]
pub async fn auth_error_page(
    State(state): State<AppState>,
    Query(query): Query<AuthErrorQuery>,
) -> Json<AuthErrorPage> {
    let message = match query.error.as_deref() {
        Some("CredentialsSignin") => "Invalid credentials",
        Some("AccessDenied") => "Access denied",
        _ => "Something went wrong",
    };

    Json(AuthErrorPage {
        message: message.to_string(),
        back_to_login: state.access_policy.routes().login_path.clone(),
    })
}

/// Signed-in area
///
/// Admins get the admin dashboard, everyone else the user dashboard.
#[utoipa::path(
    get,
    path = "/app",
    responses(
        (status = 200, description = "Dashboard for the current user", body = Dashboard),
        (status = 307, description = "No session; redirected to the login page")
    ),
    security(("session_cookie" = [])),
    tag = "Pages"
)]
pub async fn app_page(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<Dashboard>, AppError> {
    let session =
        session.ok_or_else(|| AppError::unauthorized("Sign in required".to_string()))?;
    let logout = format!("{}/logout", state.access_policy.routes().api_auth_prefix);

    Ok(Json(Dashboard::for_user(session.user(), logout)))
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "Health"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
