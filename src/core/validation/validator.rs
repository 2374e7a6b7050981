//! Entry point composing the per-entity rule sets
//!
//! A batch is validated header first, then each payment request in order, and
//! within each request its own rules before its invoice lines. The route is
//! resolved once from the batch and shared by every nested evaluation.

use std::sync::Arc;

use tracing::debug;

use super::engine::RuleSet;
use super::result::{ValidationResult, item_path};
use super::rules::{batch_rules, invoice_line_rules, payment_request_rules};
use crate::core::route::{Route, RouteContext};
use crate::entities::{BatchStatus, InvoiceLine, PaymentRequest, PaymentRequestBatch};
use crate::reference::ReferenceDataProvider;

pub struct PaymentValidator {
    provider: Arc<dyn ReferenceDataProvider>,
    batch_rules: RuleSet<PaymentRequestBatch, ()>,
    request_rules: RuleSet<PaymentRequest, RouteContext>,
    line_rules: RuleSet<InvoiceLine, RouteContext>,
}

impl PaymentValidator {
    pub fn new(provider: Arc<dyn ReferenceDataProvider>) -> Self {
        Self {
            provider,
            batch_rules: batch_rules(),
            request_rules: payment_request_rules(),
            line_rules: invoice_line_rules(),
        }
    }

    /// Validate a whole batch and everything it contains
    pub async fn validate_batch(&self, batch: &PaymentRequestBatch) -> ValidationResult {
        let mut result = self
            .batch_rules
            .evaluate(batch, &(), self.provider.as_ref(), "")
            .await;

        let ctx = RouteContext::new(Route::from_batch(batch), batch.status);
        for (index, request) in batch.payment_requests.iter().enumerate() {
            let path = item_path("", "paymentRequests", index);
            result.merge(self.evaluate_request(request, &ctx, &path).await);
        }

        debug!(
            batch_id = %batch.id,
            failures = result.failures.len(),
            skipped = result.skipped.len(),
            "batch validated"
        );
        result
    }

    /// Validate one payment request under an explicit route and status
    pub async fn validate_payment_request(
        &self,
        request: &PaymentRequest,
        route: &Route,
        status: BatchStatus,
    ) -> ValidationResult {
        let ctx = RouteContext::new(route.clone(), status);
        let result = self.evaluate_request(request, &ctx, "").await;

        debug!(
            payment_request_id = %request.payment_request_id,
            failures = result.failures.len(),
            skipped = result.skipped.len(),
            "payment request validated"
        );
        result
    }

    async fn evaluate_request(
        &self,
        request: &PaymentRequest,
        ctx: &RouteContext,
        path: &str,
    ) -> ValidationResult {
        let provider = self.provider.as_ref();
        let mut result = self.request_rules.evaluate(request, ctx, provider, path).await;

        for (index, line) in request.invoice_lines.iter().enumerate() {
            let line_path = item_path(path, "invoiceLines", index);
            result.merge(self.line_rules.evaluate(line, ctx, provider, &line_path).await);
        }
        result
    }
}
