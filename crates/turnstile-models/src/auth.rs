//! Authentication request schemas and action result codes.
//!
//! The codes serialize to the stable `SCREAMING_SNAKE_CASE` strings that
//! clients match on (`"INVALID_FIELDS"`, `"ACCOUNT_CREATED"`, ...).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Minimum length of usernames and passwords, in UTF-16 code units.
pub const MIN_CREDENTIAL_LENGTH: usize = 4;

/// Length check counting UTF-16 code units, so a character outside the
/// Basic Multilingual Plane counts as two, the way browsers measure input.
pub fn validate_credential_length(value: &str) -> Result<(), ValidationError> {
    if value.encode_utf16().count() >= MIN_CREDENTIAL_LENGTH {
        Ok(())
    } else {
        Err(ValidationError::new("length"))
    }
}

/// Login form: username and password, both at least four UTF-16 code units.
///
/// Missing fields deserialize as empty strings so they fail validation
/// instead of failing JSON parsing.
#[derive(Clone, Default, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_credential_length"))]
    #[schema(example = "alice123")]
    pub username: String,
    #[serde(default)]
    #[validate(custom(function = "validate_credential_length"))]
    #[schema(example = "hunter22")]
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration form; same shape and rules as [`LoginRequest`].
#[derive(Clone, Default, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_credential_length"))]
    #[schema(example = "alice123")]
    pub username: String,
    #[serde(default)]
    #[validate(custom(function = "validate_credential_length"))]
    #[schema(example = "hunter22")]
    pub password: String,
}

impl RegisterRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoginError {
    InvalidFields,
    UserNotFound,
    InvalidCredentials,
    UnknownError,
}

impl LoginError {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoginError::InvalidFields => "INVALID_FIELDS",
            LoginError::UserNotFound => "USER_NOT_FOUND",
            LoginError::InvalidCredentials => "INVALID_CREDENTIALS",
            LoginError::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegisterSuccess {
    AccountCreated,
}

impl RegisterSuccess {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegisterSuccess::AccountCreated => "ACCOUNT_CREATED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegisterError {
    InvalidFields,
    UsernameTaken,
    UnknownError,
}

impl RegisterError {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegisterError::InvalidFields => "INVALID_FIELDS",
            RegisterError::UsernameTaken => "USERNAME_TAKEN",
            RegisterError::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

/// `{"success": "<CODE>"}` body, with the post-action destination when the
/// action ends in a redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActionSuccess {
    #[schema(example = "LOGIN_SUCCESS")]
    pub success: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "/app")]
    pub redirect: Option<String>,
}

impl ActionSuccess {
    pub fn new(code: &str) -> Self {
        Self {
            success: code.to_string(),
            redirect: None,
        }
    }

    pub fn with_redirect(code: &str, target: impl Into<String>) -> Self {
        Self {
            success: code.to_string(),
            redirect: Some(target.into()),
        }
    }
}

/// `{"error": "<CODE>"}` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActionFailure {
    #[schema(example = "INVALID_FIELDS")]
    pub error: String,
}

impl ActionFailure {
    pub fn new(code: &str) -> Self {
        Self {
            error: code.to_string(),
        }
    }
}
