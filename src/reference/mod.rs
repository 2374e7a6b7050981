//! Reference data access layer
//!
//! Lookups against the external reference data service: query construction,
//! the HTTP client, response classification, and the cached single-flight
//! provider the validation rules depend on.

pub mod cache;
pub mod client;
pub mod provider;
pub mod query;
pub mod response;

pub use cache::{CacheStore, ExpirationPolicy};
pub use client::{HttpReferenceDataClient, RawResponse, ReferenceDataClient};
pub use provider::{CachedReferenceDataProvider, ReferenceDataApi, ReferenceDataProvider};
pub use query::{DataShape, LookupType, ReferenceQuery};
pub use response::{ApiResponse, ReferenceCode, ReferenceData, RouteCombination};
