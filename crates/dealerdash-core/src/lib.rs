//! # DealerDash Core
//!
//! Error and result types shared by every layer of the DealerDash workspace,
//! from the SOAP client up to the REST boundary.

pub mod error;
pub mod result;

pub use error::*;
pub use result::*;
