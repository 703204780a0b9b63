//! Middleware and extractors for request processing.
//!
//! - [`access`]: the access gate applied to the whole router
//! - [`session`]: session cookie helpers and the [`CurrentSession`] extractor
//!
//! # Request flow
//!
//! 1. The browser sends the session cookie (`turnstile.session-token` by default)
//! 2. `access_gate` reconstructs the session and asks the access policy
//! 3. Redirect decisions are answered with `307`; allowed requests carry
//!    the session to the handler
//! 4. Handlers read it with the `CurrentSession` extractor
//!
//! ```ignore
//! use crate::middleware::session::CurrentSession;
//!
//! async fn profile(CurrentSession(session): CurrentSession) -> impl IntoResponse {
//!     Json(session.map(|session| session.user()))
//! }
//! ```

pub mod access;
pub mod session;

pub use session::CurrentSession;
