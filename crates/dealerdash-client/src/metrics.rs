//! Prometheus metrics for the DMS client.

use metrics::{describe_counter, describe_histogram};

/// Metric names for the DMS client.
pub mod names {
    /// Calls answered from the cache.
    pub const CACHE_HITS_TOTAL: &str = "dealerdash_dms_cache_hits_total";
    /// Calls that required an upstream fetch.
    pub const CACHE_MISSES_TOTAL: &str = "dealerdash_dms_cache_misses_total";
    /// Calls that joined an in-flight fetch for the same fingerprint.
    pub const COALESCED_TOTAL: &str = "dealerdash_dms_coalesced_total";
    /// Upstream SOAP requests sent.
    pub const UPSTREAM_REQUESTS_TOTAL: &str = "dealerdash_dms_upstream_requests_total";
    /// Upstream SOAP requests that failed, labelled by error code.
    pub const UPSTREAM_FAILURES_TOTAL: &str = "dealerdash_dms_upstream_failures_total";
    /// Upstream request duration in seconds.
    pub const UPSTREAM_DURATION_SECONDS: &str = "dealerdash_dms_upstream_duration_seconds";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(names::CACHE_HITS_TOTAL, "Total DMS calls served from the cache");
    describe_counter!(names::CACHE_MISSES_TOTAL, "Total DMS calls that missed the cache");
    describe_counter!(
        names::COALESCED_TOTAL,
        "Total DMS calls that joined an in-flight request"
    );
    describe_counter!(
        names::UPSTREAM_REQUESTS_TOTAL,
        "Total SOAP requests sent to the DMS"
    );
    describe_counter!(
        names::UPSTREAM_FAILURES_TOTAL,
        "Total SOAP requests to the DMS that failed"
    );
    describe_histogram!(
        names::UPSTREAM_DURATION_SECONDS,
        metrics::Unit::Seconds,
        "DMS SOAP request duration in seconds"
    );
}
