use std::env;

use crate::env_flag;

/// Default session lifetime: 30 days.
pub const DEFAULT_SESSION_MAX_AGE: i64 = 30 * 24 * 60 * 60;

/// Longest accepted session lifetime: 10 years.
pub const MAX_SESSION_MAX_AGE: i64 = 10 * 365 * 24 * 60 * 60;

pub const DEFAULT_SESSION_COOKIE_NAME: &str = "turnstile.session-token";

#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// HS256 signing secret for session tokens.
    pub secret: String,
    /// Token and cookie lifetime in seconds.
    pub max_age: i64,
    pub cookie_name: String,
    /// Adds the `Secure` attribute to the session cookie.
    pub cookie_secure: bool,
    /// Treat sessions whose subject no longer resolves to a user as absent.
    pub reject_orphaned: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: "your-secret-key-change-in-production".to_string(),
            max_age: DEFAULT_SESSION_MAX_AGE,
            cookie_name: DEFAULT_SESSION_COOKIE_NAME.to_string(),
            cookie_secure: false,
            reject_orphaned: true,
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let secret = match env::var("SESSION_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("SESSION_SECRET is not set, using the development secret");
                defaults.secret
            }
        };

        Self {
            secret,
            max_age: env::var("SESSION_MAX_AGE")
                .ok()
                .map_or(defaults.max_age, |raw| parse_max_age(&raw)),
            cookie_name: env::var("SESSION_COOKIE_NAME").unwrap_or(defaults.cookie_name),
            cookie_secure: env_flag("SESSION_COOKIE_SECURE").unwrap_or(defaults.cookie_secure),
            reject_orphaned: env_flag("SESSION_REJECT_ORPHANED")
                .unwrap_or(defaults.reject_orphaned),
        }
    }
}

/// Parses `SESSION_MAX_AGE`, falling back to the default for values that
/// are unparsable, non-positive or above [`MAX_SESSION_MAX_AGE`].
pub fn parse_max_age(raw: &str) -> i64 {
    match raw.trim().parse::<i64>() {
        Ok(secs) if (1..=MAX_SESSION_MAX_AGE).contains(&secs) => secs,
        Ok(secs) => {
            tracing::warn!(
                max_age = secs,
                limit = MAX_SESSION_MAX_AGE,
                "SESSION_MAX_AGE out of range, using the default lifetime"
            );
            DEFAULT_SESSION_MAX_AGE
        }
        Err(_) => {
            tracing::warn!(
                value = raw,
                "SESSION_MAX_AGE is not a number, using the default lifetime"
            );
            DEFAULT_SESSION_MAX_AGE
        }
    }
}
