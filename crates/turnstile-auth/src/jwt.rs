//! Session token signing and verification (HS256).

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use turnstile_config::SessionConfig;
use turnstile_core::AppError;
use turnstile_models::User;

use crate::claims::SessionClaims;

/// Signs a session token for `user`, valid for `config.max_age` seconds.
pub fn create_session_token(user: &User, config: &SessionConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = now
        .checked_add(config.max_age)
        .ok_or_else(|| {
            AppError::internal_error(format!(
                "Session lifetime {}s overflows the expiry timestamp",
                config.max_age
            ))
        })?
        .max(0);

    let claims = SessionClaims::for_user(user, now as usize, exp as usize);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create session token: {}", e)))
}

/// Checks signature and expiry, returning the embedded claims.
pub fn verify_session_token(token: &str, config: &SessionConfig) -> Result<SessionClaims, AppError> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired session token".to_string()))
}
