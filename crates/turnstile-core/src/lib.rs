//! # Turnstile Core
//!
//! Foundational pieces shared by every Turnstile crate:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use turnstile_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("s3cret-pass")?;
//! assert!(verify_password("s3cret-pass", &hash)?);
//!
//! let error = AppError::unauthorized("Missing session".to_string());
//! ```

pub mod errors;
pub mod password;

pub use errors::AppError;
pub use password::{PASSWORD_HASH_COST, hash_password, verify_password};
