//! # Turnstile Auth
//!
//! The access-control core of Turnstile:
//!
//! - [`claims`]: the claims carried by a session token
//! - [`jwt`]: session token signing and verification
//! - [`session`]: the session issuer (credential check, token issue,
//!   per-request reconstruction and enrichment)
//! - [`routes`]: route classification and the allow / redirect decision
//!
//! # Example
//!
//! ```ignore
//! use turnstile_auth::{AccessDecision, AccessPolicy, SessionIssuer};
//!
//! let issuer = SessionIssuer::new(store, SessionConfig::from_env());
//! let issued = issuer.sign_in("alice123", "hunter22").await?;
//!
//! let session = issuer.reconstruct(&issued.token).await;
//! let policy = AccessPolicy::new(RouteConfig::default());
//! assert_eq!(
//!     policy.decide("/app", issuer.is_active(session.as_ref())),
//!     AccessDecision::Allow
//! );
//! ```

pub mod claims;
pub mod jwt;
pub mod routes;
pub mod session;

pub use claims::SessionClaims;
pub use jwt::{create_session_token, verify_session_token};
pub use routes::{AccessDecision, AccessPolicy, RouteClass};
pub use session::{IssuedSession, Session, SessionIssuer, SignInError, SubjectStatus};
