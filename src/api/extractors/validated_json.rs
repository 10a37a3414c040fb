//! JSON extractor that runs field validation before the handler sees the
//! payload.
//!
//! Deserialization failures and validation failures both surface as a
//! `Validation` error, so malformed register/login/course bodies all come
//! back as a 400 with a readable message.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// JSON body that has already passed its `validator` rules.
///
/// ```rust,ignore
/// async fn register(ValidatedJson(payload): ValidatedJson<RegisterRequest>) {
///     // payload fields satisfy their #[validate(...)] attributes
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;

        if let Err(errors) = value.validate() {
            return Err(AppError::validation(collect_messages(&errors)));
        }

        Ok(ValidatedJson(value))
    }
}

/// Flatten field errors into one comma-separated message, preferring the
/// message declared on the attribute over the field name.
fn collect_messages(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();

    // Field iteration order follows a hash map; sort for a stable message
    messages.sort();
    messages.join(", ")
}
