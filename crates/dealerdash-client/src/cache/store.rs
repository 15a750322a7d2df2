use super::Fingerprint;
use crate::normalizer::ResponseData;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// A cached response and when it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub fingerprint: Fingerprint,
    pub value: ResponseData,
    pub timestamp: Instant,
}

impl CacheEntry {
    /// Valid while strictly less than `ttl` has elapsed since storage.
    #[must_use]
    pub fn is_valid(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.timestamp) < ttl
    }
}

/// In-memory fingerprint to response map.
///
/// Expired entries are never evicted on their own; they are overwritten by
/// the next successful fetch or dropped by [`CacheStore::clear`].
#[derive(Debug, Default)]
pub struct CacheStore {
    entries: Mutex<HashMap<Fingerprint, CacheEntry>>,
}

impl CacheStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for a fingerprint, expired or not.
    #[must_use]
    pub fn get(&self, fingerprint: &Fingerprint) -> Option<CacheEntry> {
        self.entries.lock().get(fingerprint).cloned()
    }

    /// Returns the stored value only if it is still within `ttl`.
    #[must_use]
    pub fn get_valid(
        &self,
        fingerprint: &Fingerprint,
        now: Instant,
        ttl: Duration,
    ) -> Option<ResponseData> {
        self.entries
            .lock()
            .get(fingerprint)
            .filter(|entry| entry.is_valid(now, ttl))
            .map(|entry| entry.value.clone())
    }

    /// Stores a value, replacing any previous entry for the fingerprint.
    pub fn put(&self, fingerprint: Fingerprint, value: ResponseData, now: Instant) {
        let entry = CacheEntry {
            fingerprint: fingerprint.clone(),
            value,
            timestamp: now,
        };
        self.entries.lock().insert(fingerprint, entry);
    }

    /// Drops every entry and returns how many there were.
    pub fn clear(&self) -> usize {
        let mut entries = self.entries.lock();
        let count = entries.len();
        entries.clear();
        count
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Parameters;

    fn data(value: &str) -> ResponseData {
        let mut data = ResponseData::new();
        data.insert("Total".to_string(), value.to_string());
        data
    }

    fn key(method: &str) -> Fingerprint {
        Fingerprint::compute(method, &Parameters::new())
    }

    #[test]
    fn test_validity_boundary() {
        let now = Instant::now();
        let entry = CacheEntry {
            fingerprint: key("GetDivisions"),
            value: data("1"),
            timestamp: now,
        };
        let ttl = Duration::from_secs(300);

        assert!(entry.is_valid(now, ttl));
        assert!(entry.is_valid(now + Duration::from_secs(299), ttl));
        assert!(!entry.is_valid(now + ttl, ttl));
        assert!(!entry.is_valid(now + Duration::from_secs(301), ttl));
    }

    #[test]
    fn test_get_valid_respects_ttl() {
        let store = CacheStore::new();
        let now = Instant::now();
        let ttl = Duration::from_secs(60);
        store.put(key("PullInventory"), data("42"), now);

        assert_eq!(store.get_valid(&key("PullInventory"), now, ttl), Some(data("42")));
        assert_eq!(store.get_valid(&key("PullInventory"), now + ttl, ttl), None);
        // Expired entries stay in the map until overwritten or cleared.
        assert!(store.get(&key("PullInventory")).is_some());
        assert_eq!(store.get_valid(&key("PullDeals"), now, ttl), None);
    }

    #[test]
    fn test_put_overwrites() {
        let store = CacheStore::new();
        let now = Instant::now();
        store.put(key("PullDeals"), data("1"), now);
        store.put(key("PullDeals"), data("2"), now + Duration::from_secs(10));

        let entry = store.get(&key("PullDeals")).unwrap();
        assert_eq!(entry.value, data("2"));
        assert_eq!(entry.timestamp, now + Duration::from_secs(10));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_returns_count() {
        let store = CacheStore::new();
        let now = Instant::now();
        store.put(key("PullDeals"), data("1"), now);
        store.put(key("PullInventory"), data("2"), now);

        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
        assert_eq!(store.clear(), 0);
    }
}
