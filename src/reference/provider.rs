//! Reference data providers
//!
//! [`ReferenceDataApi`] turns client calls into classified [`ApiResponse`]s.
//! [`CachedReferenceDataProvider`] wraps it with a [`CacheStore`] and makes
//! sure a cold key is fetched at most once however many callers ask for it
//! at the same time.
//!
//! # Single-flight
//!
//! Each cache key gets its own async mutex, created on first miss. A caller
//! that misses takes the key's lock, re-checks the cache, and only fetches if
//! the entry is still absent. Callers waiting on the same key find the entry
//! populated once the lock is released. Callers for other keys hold other
//! locks and never wait on this one.

use async_trait::async_trait;
use axum::http::StatusCode;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

use super::cache::{CacheStore, ExpirationPolicy};
use super::client::ReferenceDataClient;
use super::query::ReferenceQuery;
use super::response::{ApiResponse, ReferenceData, classify_reference};

/// Source of reference data lists
///
/// Never fails with `Err`: every problem is reported through a non-success
/// [`ApiResponse`] so callers can treat it as "not valid".
#[async_trait]
pub trait ReferenceDataProvider: Send + Sync {
    async fn get_list(&self, query: &ReferenceQuery) -> ApiResponse<ReferenceData>;
}

/// Uncached provider: one remote call per lookup
#[derive(Clone)]
pub struct ReferenceDataApi {
    client: Arc<dyn ReferenceDataClient>,
}

impl ReferenceDataApi {
    pub fn new(client: Arc<dyn ReferenceDataClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReferenceDataProvider for ReferenceDataApi {
    async fn get_list(&self, query: &ReferenceQuery) -> ApiResponse<ReferenceData> {
        let shape = query.lookup().shape();
        info!(lookup = %query.lookup(), path = %query, "fetching reference data");

        let raw = match self.client.fetch(query).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(lookup = %query.lookup(), error = %err, "reference data request failed");
                return ApiResponse::failure(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ReferenceData::empty(shape),
                )
                .with_error("request", err.to_string());
            }
        };

        let response = classify_reference(shape, &raw);
        if !response.is_success {
            if response.errors.contains_key("deserializing") {
                warn!(
                    lookup = %query.lookup(),
                    errors = ?response.errors,
                    "failed to deserialize reference data"
                );
            } else {
                warn!(
                    lookup = %query.lookup(),
                    upstream_status = raw.status.as_u16(),
                    status = response.status.as_u16(),
                    "reference data lookup unsuccessful"
                );
            }
        }
        response
    }
}

/// Caching, single-flight provider
pub struct CachedReferenceDataProvider {
    api: ReferenceDataApi,
    cache: CacheStore<ReferenceQuery, ReferenceData>,
    locks: Mutex<HashMap<ReferenceQuery, Arc<tokio::sync::Mutex<()>>>>,
}

impl CachedReferenceDataProvider {
    pub fn new(client: Arc<dyn ReferenceDataClient>, policy: ExpirationPolicy) -> Self {
        Self {
            api: ReferenceDataApi::new(client),
            cache: CacheStore::new(policy),
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn cache(&self) -> &CacheStore<ReferenceQuery, ReferenceData> {
        &self.cache
    }

    /// Drop a single cached lookup so the next call refetches it
    pub async fn invalidate(&self, query: &ReferenceQuery) {
        self.cache.remove(query).await;
    }

    /// Drop every cached lookup
    pub async fn clear(&self) {
        self.cache.clear().await;
        info!("reference data cache cleared");
    }

    pub async fn purge_expired(&self) -> usize {
        self.cache.purge_expired().await
    }

    fn key_lock(&self, query: &ReferenceQuery) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks
            .entry(query.clone())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }
}

#[async_trait]
impl ReferenceDataProvider for CachedReferenceDataProvider {
    async fn get_list(&self, query: &ReferenceQuery) -> ApiResponse<ReferenceData> {
        if let Some(data) = self.cache.get(query).await {
            debug!(lookup = %query.lookup(), path = %query, "reference data cache hit");
            return ApiResponse::success(StatusCode::OK, data);
        }

        let lock = self.key_lock(query);
        let _guard = lock.lock().await;

        if let Some(data) = self.cache.get(query).await {
            debug!(lookup = %query.lookup(), path = %query, "reference data populated while waiting");
            return ApiResponse::success(StatusCode::OK, data);
        }

        debug!(lookup = %query.lookup(), path = %query, "reference data cache miss");
        let response = self.api.get_list(query).await;
        if response.is_success {
            self.cache.insert(query.clone(), response.data.clone()).await;
        }
        response
    }
}
