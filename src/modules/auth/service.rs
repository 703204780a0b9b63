use tracing::{debug, error, info, instrument, warn};
use turnstile_auth::{SessionIssuer, SignInError};
use turnstile_config::RegistrationConfig;
use turnstile_core::hash_password;
use turnstile_db::{StoreError, UserStore};
use turnstile_models::{NewUser, UserRole};
use validator::Validate;

use crate::metrics::{
    track_registration_failure, track_session_issued, track_user_created,
    track_user_login_failure, track_user_login_success,
};
use crate::validator::format_errors;

use super::model::{
    LoginError, LoginRequest, LoginResult, LoginSuccess, RegisterError, RegisterRequest,
    RegisterResult, RegisterSuccess,
};

pub struct AuthService;

impl AuthService {
    /// Signs a user in, returning where to send them on success.
    ///
    /// Every failure is folded into a [`LoginError`] code; nothing here
    /// returns an unhandled error.
    #[instrument(skip_all, fields(username = %dto.username))]
    pub async fn login(
        store: &dyn UserStore,
        sessions: &SessionIssuer,
        redirect_target: &str,
        dto: LoginRequest,
    ) -> LoginResult {
        if let Err(errors) = dto.validate() {
            debug!(errors = %format_errors(&errors), "Login rejected by validation");
            track_user_login_failure("invalid_fields");
            return Err(LoginError::InvalidFields);
        }

        match store.find_by_username(&dto.username).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                debug!("Login for unknown user");
                track_user_login_failure("user_not_found");
                return Err(LoginError::UserNotFound);
            }
            Err(e) => {
                error!(error = %e, "User store unavailable during login");
                track_user_login_failure("store_unavailable");
                return Err(LoginError::UnknownError);
            }
        }

        match sessions.sign_in(&dto.username, &dto.password).await {
            Ok(session) => {
                info!(user_id = %session.claims.sub, "User logged in");
                track_user_login_success(session.claims.role.as_str());
                track_session_issued();
                Ok(LoginSuccess::LoggedInRedirect {
                    target: redirect_target.to_string(),
                    session,
                })
            }
            Err(SignInError::CredentialsSignin) => {
                debug!("Login with wrong password");
                track_user_login_failure("invalid_credentials");
                Err(LoginError::InvalidCredentials)
            }
            Err(e) => {
                error!(error = %e, "Sign-in failed");
                track_user_login_failure("unknown_error");
                Err(LoginError::UnknownError)
            }
        }
    }

    /// Creates an account; the role comes from the configured policy.
    #[instrument(skip_all, fields(username = %dto.username))]
    pub async fn register(
        store: &dyn UserStore,
        registration: &RegistrationConfig,
        dto: RegisterRequest,
    ) -> RegisterResult {
        if let Err(errors) = dto.validate() {
            debug!(errors = %format_errors(&errors), "Registration rejected by validation");
            track_registration_failure("invalid_fields");
            return Err(RegisterError::InvalidFields);
        }

        match store.find_by_username(&dto.username).await {
            Ok(None) => {}
            Ok(Some(_)) => {
                debug!("Username already registered");
                track_registration_failure("username_taken");
                return Err(RegisterError::UsernameTaken);
            }
            Err(e) => {
                error!(error = %e, "User store unavailable during registration");
                track_registration_failure("store_unavailable");
                return Err(RegisterError::UnknownError);
            }
        }

        let role = if registration.role_policy.grants_admin(&dto.username) {
            UserRole::Admin
        } else {
            UserRole::User
        };

        let password = dto.password;
        let password_hash = match tokio::task::spawn_blocking(move || hash_password(&password)).await
        {
            Ok(Ok(hash)) => hash,
            Ok(Err(e)) => {
                error!(error = %e, "Failed to hash password");
                track_registration_failure("unknown_error");
                return Err(RegisterError::UnknownError);
            }
            Err(e) => {
                error!(error = %e, "Password hashing task failed");
                track_registration_failure("unknown_error");
                return Err(RegisterError::UnknownError);
            }
        };

        let new_user = NewUser {
            username: dto.username,
            password_hash,
            role,
        };

        match store.create(new_user).await {
            Ok(user) => {
                info!(user_id = %user.id, role = %user.role, "Account created");
                track_user_created(user.role.as_str());
                Ok(RegisterSuccess::AccountCreated)
            }
            Err(StoreError::UsernameTaken(username)) => {
                warn!(username = %username, "Username claimed by a concurrent registration");
                track_registration_failure("username_taken");
                Err(RegisterError::UsernameTaken)
            }
            Err(e) => {
                error!(error = %e, "Failed to persist new account");
                track_registration_failure("unknown_error");
                Err(RegisterError::UnknownError)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use turnstile_config::{RolePolicy, SessionConfig};
    use turnstile_db::MemoryUserStore;

    fn issuer(store: Arc<MemoryUserStore>) -> SessionIssuer {
        SessionIssuer::new(
            store,
            SessionConfig {
                secret: "test-secret-key-at-least-32-characters-long".to_string(),
                ..SessionConfig::default()
            },
        )
    }

    async fn register(store: &MemoryUserStore, username: &str) -> RegisterResult {
        AuthService::register(
            store,
            &RegistrationConfig::default(),
            RegisterRequest::new(username, "hunter22"),
        )
        .await
    }

    #[tokio::test]
    async fn test_login_short_username_skips_store() {
        let store = Arc::new(MemoryUserStore::new());
        let sessions = issuer(store.clone());

        let result = AuthService::login(
            store.as_ref(),
            &sessions,
            "/app",
            LoginRequest::new("bob", "hunter22"),
        )
        .await;

        assert_eq!(result.unwrap_err(), LoginError::InvalidFields);
        assert_eq!(store.lookup_count(), 0);
    }

    #[tokio::test]
    async fn test_login_outcomes() {
        let store = Arc::new(MemoryUserStore::new());
        let sessions = issuer(store.clone());
        register(&store, "alice123").await.unwrap();

        let ghost = AuthService::login(
            store.as_ref(),
            &sessions,
            "/app",
            LoginRequest::new("ghost", "hunter22"),
        )
        .await;
        assert_eq!(ghost.unwrap_err(), LoginError::UserNotFound);

        let wrong = AuthService::login(
            store.as_ref(),
            &sessions,
            "/app",
            LoginRequest::new("alice123", "wrong-password"),
        )
        .await;
        assert_eq!(wrong.unwrap_err(), LoginError::InvalidCredentials);

        let ok = AuthService::login(
            store.as_ref(),
            &sessions,
            "/app",
            LoginRequest::new("alice123", "hunter22"),
        )
        .await
        .unwrap();
        let LoginSuccess::LoggedInRedirect { target, session } = ok;
        assert_eq!(target, "/app");
        assert_eq!(session.claims.username, "alice123");
        assert_eq!(session.claims.role, UserRole::User);
    }

    #[tokio::test]
    async fn test_login_store_outage_is_unknown_error() {
        let store = Arc::new(MemoryUserStore::new());
        let sessions = issuer(store.clone());
        store.set_available(false);

        let result = AuthService::login(
            store.as_ref(),
            &sessions,
            "/app",
            LoginRequest::new("alice123", "hunter22"),
        )
        .await;
        assert_eq!(result.unwrap_err(), LoginError::UnknownError);
    }

    #[tokio::test]
    async fn test_register_assigns_role_by_policy() {
        let store = MemoryUserStore::new();

        assert_eq!(
            register(&store, "newadmin123").await,
            Ok(RegisterSuccess::AccountCreated)
        );
        assert_eq!(
            register(&store, "alice123").await,
            Ok(RegisterSuccess::AccountCreated)
        );

        let admin = store.find_by_username("newadmin123").await.unwrap().unwrap();
        let user = store.find_by_username("alice123").await.unwrap().unwrap();
        assert_eq!(admin.role, UserRole::Admin);
        assert_eq!(user.role, UserRole::User);
        assert!(admin.password_hash.starts_with("$2b$10$"));
    }

    #[tokio::test]
    async fn test_register_allowlist_policy() {
        let store = MemoryUserStore::new();
        let registration = RegistrationConfig {
            role_policy: RolePolicy::Allowlist(vec!["root".to_string()]),
        };

        for username in ["root", "newadmin123"] {
            AuthService::register(&store, &registration, RegisterRequest::new(username, "hunter22"))
                .await
                .unwrap();
        }

        let root = store.find_by_username("root").await.unwrap().unwrap();
        let pretender = store.find_by_username("newadmin123").await.unwrap().unwrap();
        assert_eq!(root.role, UserRole::Admin);
        assert_eq!(pretender.role, UserRole::User);
    }

    #[tokio::test]
    async fn test_register_duplicate_and_invalid() {
        let store = MemoryUserStore::new();
        register(&store, "alice123").await.unwrap();

        assert_eq!(
            register(&store, "alice123").await,
            Err(RegisterError::UsernameTaken)
        );
        assert_eq!(register(&store, "bob").await, Err(RegisterError::InvalidFields));
    }

    #[tokio::test]
    async fn test_register_race_has_single_winner() {
        let store = MemoryUserStore::new();

        let (first, second) = tokio::join!(register(&store, "race"), register(&store, "race"));
        let mut outcomes = [first, second];
        outcomes.sort_by_key(|outcome| outcome.is_err());

        assert_eq!(outcomes[0], Ok(RegisterSuccess::AccountCreated));
        assert_eq!(outcomes[1], Err(RegisterError::UsernameTaken));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_register_store_outage() {
        let store = MemoryUserStore::new();
        store.set_available(false);

        assert_eq!(
            register(&store, "alice123").await,
            Err(RegisterError::UnknownError)
        );
    }
}
