//! Request handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use super::extractor::{Validatable, Validated};
use super::state::AppState;
use crate::core::route::Route;
use crate::core::validation::{PaymentValidator, ValidationResult};
use crate::entities::{BatchStatus, PaymentRequest, PaymentRequestBatch};

/// A single payment request submitted outside of a batch
///
/// The route and status a batch would normally supply are given explicitly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequestSubmission {
    pub payment_request: PaymentRequest,
    pub route: Route,
    #[serde(default)]
    pub status: BatchStatus,
}

impl Validatable for PaymentRequestSubmission {
    fn validate<'a>(&'a self, validator: &'a PaymentValidator) -> BoxFuture<'a, ValidationResult> {
        Box::pin(validator.validate_payment_request(
            &self.payment_request,
            &self.route,
            self.status,
        ))
    }
}

/// Body returned when a submission passes
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
}

/// POST /validate/batch
pub async fn validate_batch(
    Validated(_batch): Validated<PaymentRequestBatch>,
) -> Json<ValidationOutcome> {
    Json(ValidationOutcome { valid: true })
}

/// POST /validate/payment-request
pub async fn validate_payment_request(
    Validated(_submission): Validated<PaymentRequestSubmission>,
) -> Json<ValidationOutcome> {
    Json(ValidationOutcome { valid: true })
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

/// DELETE /cache
pub async fn clear_cache(State(state): State<AppState>) -> StatusCode {
    state.reference_cache.clear().await;
    StatusCode::NO_CONTENT
}
