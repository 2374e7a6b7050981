//! Route table

use axum::Router;
use axum::routing::{delete, get, post};
use tower_http::trace::TraceLayer;

use super::handlers::{clear_cache, health, validate_batch, validate_payment_request};
use super::state::AppState;

/// Build the service routes
///
/// - POST /validate/batch - Validate a whole batch
/// - POST /validate/payment-request - Validate one payment request under a given route
/// - GET /health - Liveness check
/// - DELETE /cache - Drop all cached reference data
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/validate/batch", post(validate_batch))
        .route("/validate/payment-request", post(validate_payment_request))
        .route("/health", get(health))
        .route("/cache", delete(clear_cache))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
