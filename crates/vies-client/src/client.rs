//! VIES HTTP client.

use crate::error::ViesError;
use crate::types::ViesResponse;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use urlencoding::encode;

/// Client for the VIES per-member-state lookup endpoint.
///
/// Holds one pooled connection set; clone it freely.
#[derive(Clone)]
pub struct ViesClient {
    client: Client,
    base_url: String,
}

impl ViesClient {
    /// Create a new VIES client.
    ///
    /// `timeout` bounds the whole request, connect through body read.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        user_agent: impl Into<String>,
    ) -> Result<Self, ViesError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.into())
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Get the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up a VAT number in the member state's registry.
    ///
    /// `country_code` must be the registry code (`EL` for Greece) and
    /// `number` the part after the prefix. A single attempt is made.
    #[instrument(skip(self))]
    pub async fn check_vat(
        &self,
        country_code: &str,
        number: &str,
    ) -> Result<ViesResponse, ViesError> {
        let url = format!(
            "{}/ms/{}/vat/{}",
            self.base_url,
            encode(country_code),
            encode(number)
        );

        debug!(url = %url, "Sending VIES lookup");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            warn!(status = %status, body = %message, "VIES lookup failed");
            return Err(ViesError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        debug!("Response body: {}", truncate(&body, 200));

        Ok(serde_json::from_str(&body)?)
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
