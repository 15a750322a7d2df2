//! Cached, coalescing DMS client.

use crate::cache::{CacheStore, Fingerprint};
use crate::clock::{Clock, SystemClock};
use crate::envelope;
use crate::methods;
use crate::metrics::names;
use crate::normalizer::{self, ResponseData, SoapFault};
use crate::params::Parameters;
use crate::transport::{with_timeout, HttpTransport, SoapRequest, Transport};
use async_trait::async_trait;
use dealerdash_config::DmsConfig;
use dealerdash_core::{DashError, DashResult};
use futures::future::{BoxFuture, FutureExt, Shared};
use metrics::{counter, histogram};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

type SharedFetch = Shared<BoxFuture<'static, DashResult<ResponseData>>>;

/// The operations the dashboard needs from the DMS.
#[async_trait]
pub trait DmsApi: Send + Sync {
    /// Calls an upstream method, serving from cache while the entry is fresh.
    async fn call(&self, method: &str, parameters: Parameters) -> DashResult<ResponseData>;

    /// Drops all cached responses, returning how many were dropped.
    fn clear_cache(&self) -> usize;

    /// Number of cached responses, fresh or expired.
    fn cached_entries(&self) -> usize;
}

/// DMS client owning its cache.
///
/// Cloning is cheap; clones share the cache, the connection pool and the
/// in-flight request table.
#[derive(Debug, Clone)]
pub struct DmsClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: DmsConfig,
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
    cache: CacheStore,
    // Lock order: `inflight` before the cache's own lock.
    inflight: Mutex<HashMap<Fingerprint, SharedFetch>>,
}

impl std::fmt::Debug for ClientInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientInner")
            .field("config", &self.config)
            .field("transport", &self.transport)
            .field("cached_entries", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl DmsClient {
    /// Creates a client talking HTTP to the configured endpoint.
    pub fn new(config: DmsConfig) -> DashResult<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_parts(config, Arc::new(transport), Arc::new(SystemClock)))
    }

    /// Creates a client from explicit parts.
    #[must_use]
    pub fn with_parts(
        config: DmsConfig,
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                config,
                transport,
                clock,
                cache: CacheStore::new(),
                inflight: Mutex::new(HashMap::new()),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &DmsConfig {
        &self.inner.config
    }

    /// Calls `method` with `parameters`.
    ///
    /// A fresh cache entry is returned without touching the network.
    /// Otherwise one fetch per fingerprint is in flight at a time; concurrent
    /// callers for the same fingerprint await that fetch. The fetch runs on
    /// its own task, so a caller that gives up does not cancel it.
    pub async fn call(&self, method: &str, parameters: Parameters) -> DashResult<ResponseData> {
        let fingerprint = Fingerprint::compute(method, &parameters);

        if let Some(data) = self.inner.cached(&fingerprint) {
            debug!(method, %fingerprint, "Returning cached data");
            counter!(names::CACHE_HITS_TOTAL).increment(1);
            return Ok(data);
        }

        let fetch = {
            let mut inflight = self.inner.inflight.lock();
            if let Some(existing) = inflight.get(&fingerprint) {
                debug!(method, %fingerprint, "Joining in-flight request");
                counter!(names::COALESCED_TOTAL).increment(1);
                existing.clone()
            } else if let Some(data) = self.inner.cached(&fingerprint) {
                // A fetch for this fingerprint finished after the first check.
                counter!(names::CACHE_HITS_TOTAL).increment(1);
                return Ok(data);
            } else {
                debug!(method, %fingerprint, "Cache miss, fetching from DMS");
                counter!(names::CACHE_MISSES_TOTAL).increment(1);
                let fetch = self.spawn_fetch(method.to_string(), parameters, fingerprint.clone());
                inflight.insert(fingerprint, fetch.clone());
                fetch
            }
        };

        fetch.await
    }

    /// Drops all cached responses. A fetch already in flight still stores
    /// its result when it completes.
    pub fn clear_cache(&self) -> usize {
        let cleared = self.inner.cache.clear();
        info!(cleared, "Cache cleared");
        cleared
    }

    #[must_use]
    pub fn cached_entries(&self) -> usize {
        self.inner.cache.len()
    }

    /// Round-trips the cheapest upstream method.
    pub async fn ping(&self) -> DashResult<ResponseData> {
        self.call(methods::GET_DIVISIONS, Parameters::new()).await
    }

    // Must be called with the in-flight lock held, so the spawned task cannot
    // remove its entry before it has been inserted.
    fn spawn_fetch(
        &self,
        method: String,
        parameters: Parameters,
        fingerprint: Fingerprint,
    ) -> SharedFetch {
        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            let _guard = InflightGuard {
                inner: Arc::clone(&inner),
                fingerprint: fingerprint.clone(),
            };
            inner.fetch(&method, &parameters, fingerprint).await
        });

        async move {
            handle
                .await
                .unwrap_or_else(|e| Err(DashError::internal(format!("DMS fetch task failed: {}", e))))
        }
        .boxed()
        .shared()
    }
}

impl ClientInner {
    fn cached(&self, fingerprint: &Fingerprint) -> Option<ResponseData> {
        self.cache
            .get_valid(fingerprint, self.clock.now(), self.config.cache_ttl())
    }

    async fn fetch(
        &self,
        method: &str,
        parameters: &Parameters,
        fingerprint: Fingerprint,
    ) -> DashResult<ResponseData> {
        let request = SoapRequest {
            action: envelope::soap_action(method),
            body: envelope::build(method, parameters, &self.config)?,
        };

        counter!(names::UPSTREAM_REQUESTS_TOTAL, "method" => method.to_string()).increment(1);
        let started = Instant::now();

        let outcome = with_timeout(self.config.request_timeout(), self.transport.send(request))
            .await
            .and_then(|raw| normalizer::parse(&raw))
            .and_then(|data| match SoapFault::from_data(&data) {
                Some(fault) => Err(fault.into()),
                None => Ok(data),
            });

        histogram!(names::UPSTREAM_DURATION_SECONDS, "method" => method.to_string())
            .record(started.elapsed().as_secs_f64());

        match outcome {
            Ok(data) => {
                self.cache.put(fingerprint, data.clone(), self.clock.now());
                info!(method, fields = data.len(), "Successfully retrieved data");
                Ok(data)
            }
            Err(e) => {
                counter!(
                    names::UPSTREAM_FAILURES_TOTAL,
                    "method" => method.to_string(),
                    "code" => e.error_code()
                )
                .increment(1);
                error!(
                    method,
                    error = %e,
                    retriable = e.is_retriable(),
                    "DMS request failed"
                );
                Err(e)
            }
        }
    }
}

/// Removes the in-flight entry when the fetch task ends, including by panic.
struct InflightGuard {
    inner: Arc<ClientInner>,
    fingerprint: Fingerprint,
}

impl Drop for InflightGuard {
    fn drop(&mut self) {
        self.inner.inflight.lock().remove(&self.fingerprint);
    }
}

#[async_trait]
impl DmsApi for DmsClient {
    async fn call(&self, method: &str, parameters: Parameters) -> DashResult<ResponseData> {
        Self::call(self, method, parameters).await
    }

    fn clear_cache(&self) -> usize {
        Self::clear_cache(self)
    }

    fn cached_entries(&self) -> usize {
        Self::cached_entries(self)
    }
}
