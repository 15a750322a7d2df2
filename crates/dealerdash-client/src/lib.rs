//! # DealerDash Client
//!
//! Cached SOAP client for the DealerBuilt DMS.
//!
//! A call flows through four pieces:
//! - [`envelope`] turns a method name and [`Parameters`] into a SOAP envelope
//! - [`transport`] POSTs it with a hard timeout
//! - [`normalizer`] flattens the reply into [`ResponseData`]
//! - [`cache`] keeps the result under a request [`Fingerprint`] until its TTL lapses
//!
//! [`DmsClient`] ties them together and coalesces concurrent identical calls
//! into a single upstream request.

pub mod cache;
pub mod client;
pub mod clock;
pub mod envelope;
pub mod methods;
pub mod metrics;
pub mod normalizer;
pub mod params;
pub mod transport;

pub use cache::{CacheEntry, CacheStore, Fingerprint};
pub use client::{DmsApi, DmsClient};
pub use clock::{Clock, ManualClock, SystemClock};
pub use normalizer::{ResponseData, SoapFault};
pub use params::{ParamValue, Parameters};
pub use transport::{HttpTransport, SoapRequest, Transport};
