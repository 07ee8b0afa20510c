//! VAT Check Proxy - EU VAT identifier validation service.
//!
//! This service sits in front of the EU VIES registry to:
//! - Reject malformed VAT identifiers locally using per-country format rules
//! - Confirm well-formed identifiers with the live registry
//! - Shield VIES from abuse with per-client sliding-window rate limits

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod limiter;
pub mod verify;

pub use config::Config;
pub use error::ProxyError;
pub use format::{normalize, validate_format, Country, FormatCheck, FormatError, VatIdentifier};
pub use limiter::{Admission, RateLimiter};
pub use verify::{VerificationProxy, VerificationResult};
