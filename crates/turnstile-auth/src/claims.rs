//! Claims embedded in a session token.

use serde::{Deserialize, Serialize};
use turnstile_models::{User, UserInfo, UserRole};
use utoipa::ToSchema;

/// JWT claims for session tokens.
///
/// `username` and `role` are a snapshot taken at issue time; the session
/// issuer overwrites them with current store values on every
/// reconstruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionClaims {
    /// User ID (subject claim)
    pub sub: String,
    pub username: String,
    pub role: UserRole,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl SessionClaims {
    pub fn for_user(user: &User, iat: usize, exp: usize) -> Self {
        Self {
            sub: user.id.to_string(),
            username: user.username.clone(),
            role: user.role,
            exp,
            iat,
        }
    }

    /// Refreshes the mutable claims from the stored record.
    pub fn enrich(&mut self, user: &User) {
        self.username = user.username.clone();
        self.role = user.role;
    }

    pub fn user_info(&self) -> UserInfo {
        UserInfo {
            id: self.sub.clone(),
            username: self.username.clone(),
            role: self.role,
        }
    }
}
