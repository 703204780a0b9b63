//! # Turnstile Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`session`]: session token signing and cookie settings
//! - [`routes`]: public / auth-only route tables consumed by the access gate
//! - [`registration`]: role assignment policy for new accounts
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//!
//! Every type also implements [`Default`] so tests and embedders can build
//! a configuration without touching process-wide state.
//!
//! # Example
//!
//! ```ignore
//! use turnstile_config::{CorsConfig, RegistrationConfig, RouteConfig, SessionConfig};
//!
//! let session_config = SessionConfig::from_env();
//! let route_config = RouteConfig::from_env();
//! let registration_config = RegistrationConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! ```

pub mod cors;
pub mod registration;
pub mod routes;
pub mod session;

pub use cors::CorsConfig;
pub use registration::{RegistrationConfig, RolePolicy};
pub use routes::RouteConfig;
pub use session::SessionConfig;

/// Reads a comma separated list, trimming entries and dropping empty ones.
pub(crate) fn env_list(key: &str) -> Option<Vec<String>> {
    std::env::var(key).ok().map(|raw| split_list(&raw))
}

pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub(crate) fn env_flag(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
}
