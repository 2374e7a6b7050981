//! # payval
//!
//! Validation engine for payment request batches, backed by a cached
//! reference-data provider.
//!
//! ## Features
//!
//! - **Declarative Rules**: Each entity has an ordered rule set of structural, cross-field and reference-data checks
//! - **Full Reports**: Every applicable rule runs; failures come back in declaration order with field paths
//! - **Guarded Rules**: Rules that do not apply are reported as skipped, not passed
//! - **Single-Flight Cache**: Concurrent lookups of the same reference list share one remote call
//! - **Problem Details**: Failed submissions map onto an RFC 7807 style HTTP response
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use payval::prelude::*;
//!
//! let client = Arc::new(HttpReferenceDataClient::new("http://reference-data:3000/", Duration::from_secs(30))?);
//! let provider = Arc::new(CachedReferenceDataProvider::new(client, ExpirationPolicy::default()));
//! let validator = PaymentValidator::new(provider);
//!
//! let result = validator.validate_batch(&batch).await;
//! for failure in &result.failures {
//!     println!("{}: {}", failure.field, failure.message);
//! }
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod reference;
pub mod server;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{
            ConfigError, PayvalError, PayvalResult, ProblemDetails, ReferenceDataError,
            RequestError, ValidationError,
        },
        route::{Route, RouteContext},
        validation::{
            PaymentValidator, RuleSet, SkippedRule, ValidationFailure, ValidationResult,
        },
    };

    // === Entities ===
    pub use crate::entities::{
        AccountType, BatchStatus, InvoiceLine, PaymentRequest, PaymentRequestBatch,
    };

    // === Reference Data ===
    pub use crate::reference::{
        ApiResponse, CacheStore, CachedReferenceDataProvider, ExpirationPolicy,
        HttpReferenceDataClient, LookupType, RawResponse, ReferenceCode, ReferenceData,
        ReferenceDataApi, ReferenceDataClient, ReferenceDataProvider, ReferenceQuery,
        RouteCombination,
    };

    // === Config ===
    pub use crate::config::ServiceConfig;

    // === Server ===
    pub use crate::server::{AppState, PaymentRequestSubmission, ServerBuilder, build_router};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use rust_decimal::Decimal;
    pub use std::sync::Arc;
    pub use std::time::Duration;
}
