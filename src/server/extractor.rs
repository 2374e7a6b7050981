//! Axum extractor for validated submissions
//!
//! `Validated<T>` deserializes the JSON body, runs it through the shared
//! [`PaymentValidator`], and rejects with a problem-details response when any
//! rule fails. Handlers only ever see submissions that passed.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;

use super::state::AppState;
use crate::core::error::{PayvalError, RequestError, ValidationError};
use crate::core::validation::{PaymentValidator, ValidationResult};
use crate::entities::PaymentRequestBatch;

/// A submission the validator knows how to check
pub trait Validatable: DeserializeOwned + Send + Sync {
    fn validate<'a>(&'a self, validator: &'a PaymentValidator) -> BoxFuture<'a, ValidationResult>;
}

impl Validatable for PaymentRequestBatch {
    fn validate<'a>(&'a self, validator: &'a PaymentValidator) -> BoxFuture<'a, ValidationResult> {
        Box::pin(validator.validate_batch(self))
    }
}

/// Axum extractor that validates the request body
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn validate_batch(
///     Validated(batch): Validated<PaymentRequestBatch>,
/// ) -> Json<ValidationOutcome> {
///     // batch passed every rule
/// }
/// ```
pub struct Validated<T>(pub T);

impl<T> Validated<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest<AppState> for Validated<T>
where
    T: Validatable + 'static,
{
    type Rejection = PayvalError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        let result = payload.validate(&state.validator).await;
        if !result.is_valid() {
            return Err(ValidationError::Failures(result.failures).into());
        }

        Ok(Validated(payload))
    }
}

fn json_rejection(rejection: JsonRejection) -> PayvalError {
    let message = rejection.body_text();
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            RequestError::UnsupportedMediaType { message }.into()
        }
        _ => RequestError::InvalidBody { message }.into(),
    }
}
