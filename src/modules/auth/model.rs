use serde::Serialize;
use turnstile_auth::IssuedSession;
use turnstile_models::UserInfo;
use utoipa::ToSchema;

pub use turnstile_models::{
    ActionFailure, ActionSuccess, LoginError, LoginRequest, RegisterError, RegisterRequest,
    RegisterSuccess,
};

pub const LOGIN_SUCCESS: &str = "LOGIN_SUCCESS";
pub const LOGGED_OUT: &str = "LOGGED_OUT";

/// Successful login outcome.
#[derive(Debug, Clone)]
pub enum LoginSuccess {
    /// Credentials accepted; the HTTP layer stores `session` in the cookie
    /// and points the client at `target`.
    LoggedInRedirect {
        target: String,
        session: IssuedSession,
    },
}

impl LoginSuccess {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginSuccess::LoggedInRedirect { .. } => LOGIN_SUCCESS,
        }
    }
}

pub type LoginResult = Result<LoginSuccess, LoginError>;
pub type RegisterResult = Result<RegisterSuccess, RegisterError>;

/// Body of `GET /api/auth/session`: the signed-in user, or `null`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct SessionResponse(pub Option<UserInfo>);
