use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use tracing::debug;
use turnstile_models::{ActionFailure, LoginError};
use validator::ValidationErrors;

/// Flattens validation errors into `"username is invalid, ..."` for logs.
pub fn format_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    fields.sort();
    fields.join(", ")
}

/// JSON body of a form action.
///
/// Field rules are checked by the action itself; this extractor only turns
/// unreadable bodies (wrong content type, malformed JSON, wrong field types)
/// into the action's `INVALID_FIELDS` outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionJson<T>(pub T);

/// Rejection for [`ActionJson`]: `400 {"error":"INVALID_FIELDS"}`.
#[derive(Debug)]
pub struct InvalidFields;

impl IntoResponse for InvalidFields {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ActionFailure::new(LoginError::InvalidFields.as_str())),
        )
            .into_response()
    }
}

impl<T, S> FromRequest<S> for ActionJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = InvalidFields;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                debug!(reason = %rejection.body_text(), "Rejected action body");
                InvalidFields
            })?;

        Ok(ActionJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turnstile_models::LoginRequest;
    use validator::Validate;

    #[test]
    fn test_format_errors_names_each_field() {
        let errors = LoginRequest::new("bob", "abc").validate().unwrap_err();
        assert_eq!(
            format_errors(&errors),
            "password is invalid, username is invalid"
        );
    }

    #[tokio::test]
    async fn test_invalid_fields_response() {
        let response = InvalidFields.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        assert_eq!(&body[..], br#"{"error":"INVALID_FIELDS"}"#);
    }
}
