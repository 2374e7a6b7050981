use std::sync::Arc;

use crate::core::PaymentValidator;
use crate::reference::CachedReferenceDataProvider;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub validator: Arc<PaymentValidator>,
    /// Same provider the validator reads through, kept for cache administration
    pub reference_cache: Arc<CachedReferenceDataProvider>,
}

impl AppState {
    pub fn new(reference_cache: Arc<CachedReferenceDataProvider>) -> Self {
        Self {
            validator: Arc::new(PaymentValidator::new(reference_cache.clone())),
            reference_cache,
        }
    }
}
