//! # Turnstile Models
//!
//! Domain models and DTOs for Turnstile.
//!
//! # Modules
//!
//! - [`auth`]: login / register request schemas and the action result codes
//! - [`users`]: the stored user record and its role
//!
//! # Example
//!
//! ```ignore
//! use turnstile_models::{LoginRequest, User, UserRole};
//! use validator::Validate;
//!
//! let request = LoginRequest::new("alice123", "hunter22");
//! assert!(request.validate().is_ok());
//! ```

pub mod auth;
pub mod users;

pub use auth::{
    ActionFailure, ActionSuccess, LoginError, LoginRequest, RegisterError, RegisterRequest,
    RegisterSuccess,
};
pub use users::{NewUser, User, UserInfo, UserRole};
