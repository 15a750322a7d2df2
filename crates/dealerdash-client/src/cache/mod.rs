//! Response cache keyed by request fingerprint.

mod fingerprint;
mod store;

pub use fingerprint::Fingerprint;
pub use store::{CacheEntry, CacheStore};
