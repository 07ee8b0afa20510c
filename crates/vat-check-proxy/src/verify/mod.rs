//! Live registration check against VIES.
//!
//! Upstream failures are never reported as "invalid": by the time a lookup
//! runs the format is known to be good, so an unreachable registry yields
//! [`VerificationResult::Indeterminate`].

use crate::config::ViesConfig;
use crate::format::Country;
use chrono::{DateTime, SecondsFormat, Utc};
use std::time::Duration;
use tracing::{info, instrument, warn};
use vies_client::{ViesClient, ViesError};

/// Hard ceiling for a single lookup.
pub const MAX_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of a live lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationResult {
    /// The registry answered.
    Confirmed {
        valid: bool,
        name: String,
        address: String,
        request_date: String,
        checked_at: DateTime<Utc>,
    },
    /// The registry could not be reached or its answer could not be read.
    Indeterminate {
        error: String,
        checked_at: DateTime<Utc>,
    },
}

impl VerificationResult {
    pub fn checked_at(&self) -> DateTime<Utc> {
        match self {
            VerificationResult::Confirmed { checked_at, .. }
            | VerificationResult::Indeterminate { checked_at, .. } => *checked_at,
        }
    }
}

/// Format a timestamp the way responses carry it.
pub fn to_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Wraps [`ViesClient`] and folds every failure into an indeterminate result.
#[derive(Clone)]
pub struct VerificationProxy {
    client: ViesClient,
}

impl VerificationProxy {
    pub fn new(client: ViesClient) -> Self {
        Self { client }
    }

    /// Build the underlying client from configuration.
    pub fn from_config(config: &ViesConfig) -> Result<Self, ViesError> {
        let timeout = lookup_timeout(config.timeout);
        let client = ViesClient::new(&config.base_url, timeout, &config.user_agent)?;
        Ok(Self::new(client))
    }

    /// Ask the registry whether the number is registered.
    #[instrument(skip(self))]
    pub async fn verify(&self, country: Country, local_number: &str) -> VerificationResult {
        let country_code = country.registry_code();

        match self.client.check_vat(country_code, local_number).await {
            Ok(response) => {
                let checked_at = Utc::now();
                info!(
                    country_code,
                    valid = response.valid,
                    "VIES lookup completed"
                );

                VerificationResult::Confirmed {
                    valid: response.valid,
                    name: response.name.unwrap_or_default(),
                    address: response.address.unwrap_or_default(),
                    request_date: response
                        .request_date
                        .unwrap_or_else(|| to_timestamp(checked_at)),
                    checked_at,
                }
            }
            Err(e) => {
                warn!(country_code, error = %e, "VIES lookup failed, result indeterminate");
                VerificationResult::Indeterminate {
                    error: describe(&e).to_string(),
                    checked_at: Utc::now(),
                }
            }
        }
    }
}

fn lookup_timeout(configured: Duration) -> Duration {
    configured.min(MAX_LOOKUP_TIMEOUT)
}

fn describe(error: &ViesError) -> &'static str {
    match error {
        ViesError::Http(e) if e.is_timeout() => "VIES service timed out",
        ViesError::Http(_) => "VIES service unreachable",
        ViesError::Api { .. } => "VIES service unavailable",
        ViesError::Json(_) => "VIES service returned an unreadable response",
    }
}
