use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderValue, header::InvalidHeaderValue, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;
use turnstile_auth::Session;
use turnstile_config::SessionConfig;

use crate::state::AppState;

/// Session token carried by the request's session cookie, if any.
pub fn session_token(headers: &HeaderMap, config: &SessionConfig) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(&config.cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

/// `Set-Cookie` value storing `token` for `max_age` seconds.
pub fn session_cookie(
    config: &SessionConfig,
    token: &str,
    max_age: i64,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!(
        "{}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}",
        config.cookie_name
    );
    if config.cookie_secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// `Set-Cookie` value that expires the session cookie.
pub fn clear_session_cookie(config: &SessionConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    session_cookie(config, "", 0)
}

/// The signed-in session for this request, `None` for anonymous visitors.
///
/// The access gate stores its result in the request extensions; requests
/// that bypass the gate reconstruct the session here.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Option<Session>);

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(current) = parts.extensions.get::<CurrentSession>() {
            return Ok(current.clone());
        }

        Ok(CurrentSession(resolve_session(&parts.headers, state).await))
    }
}

/// Reconstructs the request's session and drops it unless it counts as
/// signed in.
pub async fn resolve_session(headers: &HeaderMap, state: &AppState) -> Option<Session> {
    let token = session_token(headers, state.sessions.config())?;
    let session = state.sessions.reconstruct(&token).await;
    session.filter(|session| state.sessions.is_active(Some(session)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;

    fn config() -> SessionConfig {
        SessionConfig::default()
    }

    #[test]
    fn test_session_token_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; turnstile.session-token=abc.def.ghi"),
        );
        assert_eq!(
            session_token(&headers, &config()).as_deref(),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn test_session_token_missing_or_empty() {
        let mut headers = HeaderMap::new();
        assert!(session_token(&headers, &config()).is_none());

        headers.insert(COOKIE, HeaderValue::from_static("turnstile.session-token="));
        assert!(session_token(&headers, &config()).is_none());
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie(&config(), "tok", 60).unwrap();
        assert_eq!(
            cookie.to_str().unwrap(),
            "turnstile.session-token=tok; Path=/; HttpOnly; SameSite=Lax; Max-Age=60"
        );
    }

    #[test]
    fn test_secure_cookie_and_clear() {
        let config = SessionConfig {
            cookie_secure: true,
            ..config()
        };
        let cleared = clear_session_cookie(&config).unwrap();
        let cleared = cleared.to_str().unwrap();
        assert!(cleared.starts_with("turnstile.session-token=;"));
        assert!(cleared.contains("Max-Age=0"));
        assert!(cleared.ends_with("; Secure"));
    }
}
