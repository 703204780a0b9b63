//! Session issuing and reconstruction.
//!
//! Sign-in checks credentials against the store and signs a token. Every
//! later request reconstructs the session from that token and refreshes
//! `username` / `role` from the store, so role changes apply without a new
//! login.
//!
//! A token whose subject no longer resolves is still returned, unenriched,
//! with [`SubjectStatus::Missing`]. Whether such a session counts as signed
//! in is decided by [`SessionIssuer::is_active`] from
//! `SessionConfig::reject_orphaned`.

use std::sync::Arc;

use tracing::{debug, error, instrument, warn};
use turnstile_config::SessionConfig;
use turnstile_core::verify_password;
use turnstile_db::{StoreError, UserStore};
use turnstile_models::{User, UserInfo};
use uuid::Uuid;

use crate::claims::SessionClaims;
use crate::jwt::{create_session_token, verify_session_token};

/// Outcome of looking the token subject up during reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectStatus {
    /// Subject found; claims carry current store values.
    Resolved,
    /// Subject no longer exists (deleted user or foreign id).
    Missing,
    /// The store could not be asked; claims are the issue-time snapshot.
    Unverified,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub claims: SessionClaims,
    pub subject: SubjectStatus,
}

impl Session {
    pub fn is_orphaned(&self) -> bool {
        self.subject == SubjectStatus::Missing
    }

    pub fn user(&self) -> UserInfo {
        self.claims.user_info()
    }
}

/// A freshly signed session, ready to be set as a cookie.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub claims: SessionClaims,
    /// Cookie lifetime in seconds.
    pub max_age: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum SignInError {
    /// Unknown username or wrong password.
    #[error("credentials do not match")]
    CredentialsSignin,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("stored password hash could not be verified: {0}")]
    Verification(String),

    #[error("failed to issue session token: {0}")]
    Issue(String),
}

#[derive(Clone, Debug)]
pub struct SessionIssuer {
    store: Arc<dyn UserStore>,
    config: SessionConfig,
}

impl SessionIssuer {
    pub fn new(store: Arc<dyn UserStore>, config: SessionConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Verifies `username` / `password` and signs a session for the user.
    #[instrument(skip(self, password))]
    pub async fn sign_in(
        &self,
        username: &str,
        password: &str,
    ) -> Result<IssuedSession, SignInError> {
        let user = self
            .store
            .find_by_username(username)
            .await?
            .ok_or(SignInError::CredentialsSignin)?;

        if user.password_hash.is_empty() {
            return Err(SignInError::CredentialsSignin);
        }

        let matches = verify_password(password, &user.password_hash)
            .map_err(|e| SignInError::Verification(e.error.to_string()))?;
        if !matches {
            return Err(SignInError::CredentialsSignin);
        }

        self.issue(&user)
    }

    /// Signs a session for an already authenticated user.
    pub fn issue(&self, user: &User) -> Result<IssuedSession, SignInError> {
        let token = create_session_token(user, &self.config)
            .map_err(|e| SignInError::Issue(e.error.to_string()))?;
        let claims = verify_session_token(&token, &self.config)
            .map_err(|e| SignInError::Issue(e.error.to_string()))?;

        Ok(IssuedSession {
            token,
            claims,
            max_age: self.config.max_age,
        })
    }

    /// Rebuilds the session carried by `token`.
    ///
    /// Returns `None` for tokens that fail verification. Store trouble never
    /// fails the request: the claims are returned as signed.
    #[instrument(skip_all)]
    pub async fn reconstruct(&self, token: &str) -> Option<Session> {
        let mut claims = match verify_session_token(token, &self.config) {
            Ok(claims) => claims,
            Err(_) => {
                debug!("Ignoring invalid or expired session token");
                return None;
            }
        };

        let Ok(user_id) = Uuid::parse_str(&claims.sub) else {
            warn!(sub = %claims.sub, "Session subject is not a user id");
            return Some(Session {
                claims,
                subject: SubjectStatus::Missing,
            });
        };

        let subject = match self.store.find_by_id(user_id).await {
            Ok(Some(user)) => {
                claims.enrich(&user);
                SubjectStatus::Resolved
            }
            Ok(None) => {
                warn!(user_id = %user_id, "Session subject no longer exists");
                SubjectStatus::Missing
            }
            Err(e) => {
                error!(user_id = %user_id, error = %e, "User store unavailable while enriching session");
                SubjectStatus::Unverified
            }
        };

        Some(Session { claims, subject })
    }

    /// Whether `session` counts as signed in.
    pub fn is_active(&self, session: Option<&Session>) -> bool {
        match session {
            Some(session) => !(self.config.reject_orphaned && session.is_orphaned()),
            None => false,
        }
    }
}
