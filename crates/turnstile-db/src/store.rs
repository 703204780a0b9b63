//! The user store contract.

use async_trait::async_trait;
use turnstile_models::{NewUser, User};
use uuid::Uuid;

/// Failure reported by a [`UserStore`].
///
/// "Not found" is not an error: lookups return `Ok(None)` for it, so a
/// missing user can always be told apart from an unreachable store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("username `{0}` is already taken")]
    UsernameTaken(String),

    #[error("user store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Persistence for user records.
///
/// Implementations own their concurrency control; in particular `create`
/// must reject a second user with the same username even when two calls
/// race past any caller-side existence check.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;
}
