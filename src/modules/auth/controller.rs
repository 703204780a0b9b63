use axum::Json;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::{error, instrument};

use super::model::{
    ActionFailure, ActionSuccess, LOGGED_OUT, LoginError, LoginRequest, LoginSuccess,
    RegisterError, RegisterRequest, RegisterSuccess, SessionResponse,
};
use super::service::AuthService;
use crate::middleware::session::{CurrentSession, clear_session_cookie, session_cookie};
use crate::state::AppState;
use crate::validator::ActionJson;

pub(crate) fn login_error_status(error: LoginError) -> StatusCode {
    match error {
        LoginError::InvalidFields => StatusCode::BAD_REQUEST,
        LoginError::UserNotFound => StatusCode::NOT_FOUND,
        LoginError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        LoginError::UnknownError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn register_error_status(error: RegisterError) -> StatusCode {
    match error {
        RegisterError::InvalidFields => StatusCode::BAD_REQUEST,
        RegisterError::UsernameTaken => StatusCode::CONFLICT,
        RegisterError::UnknownError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Sign in with username and password
///
/// On success the session token is set as an HTTP-only cookie.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session cookie set", body = ActionSuccess),
        (status = 400, description = "INVALID_FIELDS", body = ActionFailure),
        (status = 401, description = "INVALID_CREDENTIALS", body = ActionFailure),
        (status = 404, description = "USER_NOT_FOUND", body = ActionFailure),
        (status = 500, description = "UNKNOWN_ERROR", body = ActionFailure)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn login_user(
    State(state): State<AppState>,
    ActionJson(dto): ActionJson<LoginRequest>,
) -> Response {
    let target = &state.access_policy.routes().default_login_redirect;
    let outcome = AuthService::login(state.store.as_ref(), &state.sessions, target, dto).await;

    match outcome {
        Ok(success) => {
            let code = success.as_str();
            let LoginSuccess::LoggedInRedirect { target, session } = success;

            let config = state.sessions.config();
            let cookie = match session_cookie(config, &session.token, session.max_age) {
                Ok(cookie) => cookie,
                Err(e) => {
                    error!(error = %e, "Session token is not a valid cookie value");
                    return login_failure(LoginError::UnknownError);
                }
            };

            let mut headers = HeaderMap::new();
            headers.insert(SET_COOKIE, cookie);
            (
                StatusCode::OK,
                headers,
                Json(ActionSuccess::with_redirect(code, target)),
            )
                .into_response()
        }
        Err(error) => login_failure(error),
    }
}

fn login_failure(error: LoginError) -> Response {
    (
        login_error_status(error),
        Json(ActionFailure::new(error.as_str())),
    )
        .into_response()
}

/// Create an account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "ACCOUNT_CREATED", body = ActionSuccess),
        (status = 400, description = "INVALID_FIELDS", body = ActionFailure),
        (status = 409, description = "USERNAME_TAKEN", body = ActionFailure),
        (status = 500, description = "UNKNOWN_ERROR", body = ActionFailure)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn register_user(
    State(state): State<AppState>,
    ActionJson(dto): ActionJson<RegisterRequest>,
) -> Response {
    let outcome =
        AuthService::register(state.store.as_ref(), &state.registration_config, dto).await;

    match outcome {
        Ok(RegisterSuccess::AccountCreated) => (
            StatusCode::CREATED,
            Json(ActionSuccess::new(RegisterSuccess::AccountCreated.as_str())),
        )
            .into_response(),
        Err(error) => (
            register_error_status(error),
            Json(ActionFailure::new(error.as_str())),
        )
            .into_response(),
    }
}

/// Sign out
///
/// Expires the session cookie. Succeeds whether or not a session existed.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "LOGGED_OUT; session cookie cleared", body = ActionSuccess)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn logout_user(State(state): State<AppState>) -> Response {
    let mut headers = HeaderMap::new();
    match clear_session_cookie(state.sessions.config()) {
        Ok(cookie) => {
            headers.insert(SET_COOKIE, cookie);
        }
        Err(e) => error!(error = %e, "Failed to build session clearing cookie"),
    }

    let login_path = &state.access_policy.routes().login_path;
    (
        StatusCode::OK,
        headers,
        Json(ActionSuccess::with_redirect(LOGGED_OUT, login_path.as_str())),
    )
        .into_response()
}

/// Current session user
///
/// Returns the signed-in user with username and role refreshed from the
/// store, or `null` without a session.
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Signed-in user or null", body = SessionResponse)
    ),
    security((), ("session_cookie" = [])),
    tag = "Authentication"
)]
pub async fn get_session(CurrentSession(session): CurrentSession) -> Json<SessionResponse> {
    Json(SessionResponse(session.map(|session| session.user())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(login_error_status(LoginError::InvalidFields), StatusCode::BAD_REQUEST);
        assert_eq!(login_error_status(LoginError::UserNotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            login_error_status(LoginError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(register_error_status(RegisterError::UsernameTaken), StatusCode::CONFLICT);
        assert_eq!(
            register_error_status(RegisterError::UnknownError),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
